use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but cannot be parsed, or if
/// the delay bounds are inverted.
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
/// Returns `ConfigError` if a variable is present but cannot be parsed, or if
/// the delay bounds are inverted.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; defaults mirror the values the scraper has
/// always run with (30 s request timeout, 2–3 s politeness delay).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected true/false, got \"{raw}\""),
        })
    };

    let log_level = or_default("RANKWATCH_LOG_LEVEL", "info");
    let results_dir = PathBuf::from(or_default("RANKWATCH_RESULTS_DIR", "results"));
    let request_timeout_secs = parse_u64("RANKWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("RANKWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_invalid_certs = parse_bool("RANKWATCH_ACCEPT_INVALID_CERTS", "true")?;
    let delay_min_ms = parse_u64("RANKWATCH_DELAY_MIN_MS", "2000")?;
    let delay_max_ms = parse_u64("RANKWATCH_DELAY_MAX_MS", "3000")?;
    let browser_timeout_secs = parse_u64("RANKWATCH_BROWSER_TIMEOUT_SECS", "30")?;
    let browser_settle_ms = parse_u64("RANKWATCH_BROWSER_SETTLE_MS", "2000")?;
    let chrome_path = lookup("RANKWATCH_CHROME_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    if delay_min_ms > delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "RANKWATCH_DELAY_MIN_MS ({delay_min_ms}) exceeds RANKWATCH_DELAY_MAX_MS ({delay_max_ms})"
        )));
    }

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RANKWATCH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        results_dir,
        request_timeout_secs,
        user_agent,
        accept_invalid_certs,
        delay_min_ms,
        delay_max_ms,
        browser_timeout_secs,
        browser_settle_ms,
        chrome_path,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
