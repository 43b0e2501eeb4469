use std::path::PathBuf;

use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_OUTPUT_PATH: &str = "data/restaurants.json";
pub const DEFAULT_USER_AGENT: &str = "eatlist/0.1 (restaurant-snapshot)";

/// Runtime configuration for a snapshot run, resolved from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Google Places credential. Only `sync` needs it, so absence is reported
    /// lazily by [`AppConfig::require_places_api_key`].
    pub places_api_key: Option<String>,
    /// Published CSV URL of the restaurant sheet. The CLI may override it.
    pub sheet_csv_url: Option<String>,
    pub output_path: PathBuf,
    pub places_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Returns the Places API key or the error a `sync` run aborts with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `GOOGLE_PLACES_API_KEY` was
    /// not set (or was blank).
    pub fn require_places_api_key(&self) -> Result<&str, ConfigError> {
        self.places_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_PLACES_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sheet_csv_url", &self.sheet_csv_url)
            .field("output_path", &self.output_path)
            .field("places_base_url", &self.places_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
