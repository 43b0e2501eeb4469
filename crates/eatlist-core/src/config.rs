use std::path::PathBuf;

use crate::app_config::{
    AppConfig, DEFAULT_OUTPUT_PATH, DEFAULT_PLACES_BASE_URL, DEFAULT_USER_AGENT,
};
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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap` lookup
/// instead of calling `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Blank values count as unset: CI secrets often export empty strings.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let places_api_key = optional("GOOGLE_PLACES_API_KEY");
    let sheet_csv_url = optional("EATLIST_SHEET_CSV_URL");
    let output_path = PathBuf::from(or_default("EATLIST_OUTPUT_PATH", DEFAULT_OUTPUT_PATH));
    let places_base_url = or_default("EATLIST_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let log_level = or_default("EATLIST_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("EATLIST_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("EATLIST_USER_AGENT", DEFAULT_USER_AGENT);

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "EATLIST_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        places_api_key,
        sheet_csv_url,
        output_path,
        places_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
