mod app_config;
mod config;
mod restaurants;

pub use app_config::{
    AppConfig, DEFAULT_OUTPUT_PATH, DEFAULT_PLACES_BASE_URL, DEFAULT_USER_AGENT,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use restaurants::{
    BaseRecord, EnrichmentError, Restaurant, RunCounts, Snapshot, REQUIRED_COLUMNS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
