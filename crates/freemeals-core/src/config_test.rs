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
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.max_retries, 1);
    assert_eq!(cfg.retry_backoff_base_ms, 500);
    assert_eq!(cfg.header_row_rule, HeaderRowRule::AllOnly);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("FREEMEALS_LOG_LEVEL", "debug");
    map.insert("FREEMEALS_ENDPOINT", "http://localhost:8888/providers");
    map.insert("FREEMEALS_REQUEST_TIMEOUT_SECS", "5");
    map.insert("FREEMEALS_MAX_RETRIES", "0");
    map.insert("FREEMEALS_RETRY_BACKOFF_BASE_MS", "10");
    map.insert("FREEMEALS_HEADER_ROW_RULE", "never");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.endpoint, "http://localhost:8888/providers");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_ms, 10);
    assert_eq!(cfg.header_row_rule, HeaderRowRule::Never);
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("FREEMEALS_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FREEMEALS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FREEMEALS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("FREEMEALS_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FREEMEALS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FREEMEALS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_negative_retries() {
    let mut map = HashMap::new();
    map.insert("FREEMEALS_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FREEMEALS_MAX_RETRIES"),
        "expected InvalidEnvVar(FREEMEALS_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_empty_endpoint() {
    let mut map = HashMap::new();
    map.insert("FREEMEALS_ENDPOINT", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FREEMEALS_ENDPOINT"),
        "expected InvalidEnvVar(FREEMEALS_ENDPOINT), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_header_rule() {
    let mut map = HashMap::new();
    map.insert("FREEMEALS_HEADER_ROW_RULE", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FREEMEALS_HEADER_ROW_RULE"),
        "expected InvalidEnvVar(FREEMEALS_HEADER_ROW_RULE), got: {result:?}"
    );
}
