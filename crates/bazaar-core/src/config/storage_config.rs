//! SQLite storage configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path.
    pub path: String,
    /// Ignore `path` and keep everything in memory. Data is lost on exit.
    pub in_memory: bool,
    /// How long a writer waits on a locked database. Default: 5000ms.
    pub busy_timeout_ms: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "bazaar.db".to_string(),
            in_memory: false,
            busy_timeout_ms: None,
        }
    }
}

impl StorageConfig {
    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(5000)
    }
}
