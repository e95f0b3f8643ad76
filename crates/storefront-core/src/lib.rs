//! Shared configuration and domain primitives for the storefront workspace.

pub mod app_config;
pub mod card_config;
pub mod config;
pub mod messages;

pub use app_config::{AppConfig, Environment};
pub use card_config::{parse_inventory, CardConfig};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
