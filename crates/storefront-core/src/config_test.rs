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

/// Returns a map with all required env vars populated with valid values.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("STOREFRONT_STORE_URL", "https://shop.example.com");
    m
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_store_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STOREFRONT_STORE_URL"),
        "expected MissingEnvVar(STOREFRONT_STORE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_store_url_as_missing() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_STORE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_store_url_without_scheme() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_STORE_URL", "shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_STORE_URL"),
        "expected InvalidEnvVar(STOREFRONT_STORE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.store_url, "https://shop.example.com");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "storefront/0.1 (product-card)");
    assert_eq!(cfg.notification_display_ms, 3000);
    assert_eq!(cfg.notification_fade_ms, 300);
    assert_eq!(cfg.counter_highlight_ms, 300);
}

#[test]
fn build_app_config_reads_timing_overrides() {
    let mut map = full_env();
    map.insert("STOREFRONT_NOTIFICATION_DISPLAY_MS", "5000");
    map.insert("STOREFRONT_NOTIFICATION_FADE_MS", "100");
    map.insert("STOREFRONT_COUNTER_HIGHLIGHT_MS", "50");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.notification_display_ms, 5000);
    assert_eq!(cfg.notification_fade_ms, 100);
    assert_eq!(cfg.counter_highlight_ms, 50);
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = full_env();
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOREFRONT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_environment_and_log_level() {
    let mut map = full_env();
    map.insert("STOREFRONT_ENV", "production");
    map.insert("STOREFRONT_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
}
