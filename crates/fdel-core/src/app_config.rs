use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub geocoder_base_url: String,
    pub geocoder_country: String,
    pub geocoder_city: String,
    pub geocoder_timeout_secs: u64,
    pub geocoder_user_agent: String,
    pub geocode_pacing_ms: u64,
    pub marker_padding: f64,
    pub locations_path: Option<PathBuf>,
    pub view_page: String,
}
