pub mod logging_config;
pub mod server_config;
pub mod session_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;

use crate::errors::{BazaarError, BazaarResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BazaarConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl BazaarConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config from a file. A missing file is an error; use
    /// `BazaarConfig::default()` when no file was requested.
    pub fn load(path: &Path) -> BazaarResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BazaarError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&raw)
            .map_err(|e| BazaarError::Config(format!("invalid {}: {e}", path.display())))
    }
}
