//! Application configuration schemas.
//!
//! All configuration structs are deserialized from an optional TOML file
//! and `VAULTSHARE__`-prefixed environment variables via the `config`
//! crate. Each sub-module represents a logical configuration section.

pub mod logging;
pub mod search;
pub mod share;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::search::SearchConfig;
use self::share::ShareConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sharing session behavior.
    #[serde(default)]
    pub share: ShareConfig,
    /// Grantee search behavior.
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional; environment variables prefixed with
    /// `VAULTSHARE` (separator `__`) override values from the file.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("VAULTSHARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
