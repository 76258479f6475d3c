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
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.results_dir, PathBuf::from("results"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert!(cfg.accept_invalid_certs);
    assert_eq!(cfg.delay_min_ms, 2000);
    assert_eq!(cfg.delay_max_ms, 3000);
    assert_eq!(cfg.browser_timeout_secs, 30);
    assert_eq!(cfg.browser_settle_ms, 2000);
    assert!(cfg.chrome_path.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("RANKWATCH_LOG_LEVEL", "debug");
    map.insert("RANKWATCH_RESULTS_DIR", "/tmp/ranks");
    map.insert("RANKWATCH_REQUEST_TIMEOUT_SECS", "10");
    map.insert("RANKWATCH_USER_AGENT", "custom-agent/2.0");
    map.insert("RANKWATCH_ACCEPT_INVALID_CERTS", "false");
    map.insert("RANKWATCH_DELAY_MIN_MS", "0");
    map.insert("RANKWATCH_DELAY_MAX_MS", "500");
    map.insert("RANKWATCH_BROWSER_TIMEOUT_SECS", "120");
    map.insert("RANKWATCH_BROWSER_SETTLE_MS", "3000");
    map.insert("RANKWATCH_CHROME_PATH", "/usr/bin/chromium");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.results_dir, PathBuf::from("/tmp/ranks"));
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert!(!cfg.accept_invalid_certs);
    assert_eq!(cfg.delay_min_ms, 0);
    assert_eq!(cfg.delay_max_ms, 500);
    assert_eq!(cfg.browser_timeout_secs, 120);
    assert_eq!(cfg.browser_settle_ms, 3000);
    assert_eq!(cfg.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("RANKWATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RANKWATCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RANKWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("RANKWATCH_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RANKWATCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RANKWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_cert_flag() {
    let mut map = HashMap::new();
    map.insert("RANKWATCH_ACCEPT_INVALID_CERTS", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RANKWATCH_ACCEPT_INVALID_CERTS"),
        "expected InvalidEnvVar(RANKWATCH_ACCEPT_INVALID_CERTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_inverted_delay_bounds() {
    let mut map = HashMap::new();
    map.insert("RANKWATCH_DELAY_MIN_MS", "5000");
    map.insert("RANKWATCH_DELAY_MAX_MS", "1000");
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("RANKWATCH_DELAY_MIN_MS"));
}

#[test]
fn build_app_config_ignores_blank_chrome_path() {
    let mut map = HashMap::new();
    map.insert("RANKWATCH_CHROME_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.chrome_path.is_none());
}

#[test]
fn parse_flag_accepts_common_spellings() {
    assert_eq!(parse_flag("TRUE"), Some(true));
    assert_eq!(parse_flag(" 1 "), Some(true));
    assert_eq!(parse_flag("off"), Some(false));
    assert_eq!(parse_flag("no"), Some(false));
    assert_eq!(parse_flag(""), None);
}
