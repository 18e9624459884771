use crate::app_config::AppConfig;
use crate::header::HeaderRowRule;
use crate::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://freemeals.uk/.netlify/functions/providers";
pub const DEFAULT_USER_AGENT: &str = "freemeals/0.1 (provider-directory)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("FREEMEALS_LOG_LEVEL", "warn");

    let endpoint = or_default("FREEMEALS_ENDPOINT", DEFAULT_ENDPOINT);
    if endpoint.trim().is_empty() {
        return Err(invalid("FREEMEALS_ENDPOINT", "must not be empty".to_string()));
    }

    let request_timeout_secs = parse_u64("FREEMEALS_REQUEST_TIMEOUT_SECS", "15")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "FREEMEALS_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("FREEMEALS_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("FREEMEALS_MAX_RETRIES", "1")?;
    let retry_backoff_base_ms = parse_u64("FREEMEALS_RETRY_BACKOFF_BASE_MS", "500")?;

    let header_row_rule = or_default("FREEMEALS_HEADER_ROW_RULE", "all-only")
        .parse::<HeaderRowRule>()
        .map_err(|reason| invalid("FREEMEALS_HEADER_ROW_RULE", reason))?;

    Ok(AppConfig {
        log_level,
        endpoint,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        header_row_rule,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
