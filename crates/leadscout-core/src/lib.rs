pub mod app_config;
pub mod config;
pub mod export;
pub mod listing;
pub mod merge;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use export::{read_listings_csv, write_listings_csv, ExportError};
pub use listing::{DiscoveredEmail, EmailSource, Listing};
pub use merge::merge_batches;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
