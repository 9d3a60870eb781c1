use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing and validation, decoupled from the process environment so tests
/// can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(invalid(var, "must not be empty".to_string()));
        }
        Ok(raw)
    };

    let log_level = or_default("FDEL_LOG_LEVEL", "info");
    let geocoder_base_url = non_empty(
        "FDEL_GEOCODER_BASE_URL",
        "https://nominatim.openstreetmap.org/",
    )?;
    let geocoder_country = non_empty("FDEL_GEOCODER_COUNTRY", "Canada")?;
    let geocoder_city = non_empty("FDEL_GEOCODER_CITY", "Ottawa")?;
    let geocoder_timeout_secs = parse_u64("FDEL_GEOCODER_TIMEOUT_SECS", "30")?;
    let geocoder_user_agent = non_empty(
        "FDEL_GEOCODER_USER_AGENT",
        "fdel/0.1 (food-delivery-routes)",
    )?;
    let geocode_pacing_ms = parse_u64("FDEL_GEOCODE_PACING_MS", "1100")?;

    let marker_padding = or_default("FDEL_MARKER_PADDING", "0.25")
        .parse::<f64>()
        .map_err(|e| invalid("FDEL_MARKER_PADDING", e.to_string()))?;
    if !marker_padding.is_finite() || marker_padding < 0.0 {
        return Err(invalid(
            "FDEL_MARKER_PADDING",
            "must be a non-negative number".to_string(),
        ));
    }

    let locations_path = lookup("FDEL_LOCATIONS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let view_page = non_empty("FDEL_VIEW_PAGE", "route.html")?;

    Ok(AppConfig {
        log_level,
        geocoder_base_url,
        geocoder_country,
        geocoder_city,
        geocoder_timeout_secs,
        geocoder_user_agent,
        geocode_pacing_ms,
        marker_padding,
        locations_path,
        view_page,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
