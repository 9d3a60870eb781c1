use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.geocoder_base_url, "https://nominatim.openstreetmap.org/");
    assert_eq!(cfg.geocoder_country, "Canada");
    assert_eq!(cfg.geocoder_city, "Ottawa");
    assert_eq!(cfg.geocoder_timeout_secs, 30);
    assert_eq!(cfg.geocoder_user_agent, "fdel/0.1 (food-delivery-routes)");
    assert_eq!(cfg.geocode_pacing_ms, 1100);
    assert!((cfg.marker_padding - 0.25).abs() < f64::EPSILON);
    assert!(cfg.locations_path.is_none());
    assert_eq!(cfg.view_page, "route.html");
}

#[test]
fn geocoder_context_override() {
    let mut map = HashMap::new();
    map.insert("FDEL_GEOCODER_COUNTRY", "France");
    map.insert("FDEL_GEOCODER_CITY", "Lyon");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.geocoder_country, "France");
    assert_eq!(cfg.geocoder_city, "Lyon");
}

#[test]
fn geocoder_city_empty_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FDEL_GEOCODER_CITY", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FDEL_GEOCODER_CITY"),
        "expected InvalidEnvVar(FDEL_GEOCODER_CITY), got: {result:?}"
    );
}

#[test]
fn geocode_pacing_ms_override() {
    let mut map = HashMap::new();
    map.insert("FDEL_GEOCODE_PACING_MS", "2000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.geocode_pacing_ms, 2000);
}

#[test]
fn geocode_pacing_ms_invalid() {
    let mut map = HashMap::new();
    map.insert("FDEL_GEOCODE_PACING_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FDEL_GEOCODE_PACING_MS"),
        "expected InvalidEnvVar(FDEL_GEOCODE_PACING_MS), got: {result:?}"
    );
}

#[test]
fn geocoder_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("FDEL_GEOCODER_TIMEOUT_SECS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FDEL_GEOCODER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FDEL_GEOCODER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn marker_padding_negative_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FDEL_MARKER_PADDING", "-0.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FDEL_MARKER_PADDING"),
        "expected InvalidEnvVar(FDEL_MARKER_PADDING), got: {result:?}"
    );
}

#[test]
fn locations_path_is_optional() {
    let mut map = HashMap::new();
    map.insert("FDEL_LOCATIONS_PATH", "./config/locations.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.locations_path.as_deref(),
        Some(std::path::Path::new("./config/locations.yaml"))
    );
}

#[test]
fn debug_output_lists_fields() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("geocode_pacing_ms"));
    assert!(rendered.contains("view_page"));
}

#[test]
fn debug_output_shows_every_setting() {
    let mut map = HashMap::new();
    map.insert("FDEL_LOCATIONS_PATH", "/etc/fdel/locations.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(debug.contains("nominatim.openstreetmap.org"));
    assert!(debug.contains("locations.yaml"));
    assert!(debug.contains("route.html"));
}
