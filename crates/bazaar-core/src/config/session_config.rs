//! Session cookie configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,
    /// Mark the cookie `Secure` (HTTPS only).
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "bazaar_session".to_string(),
            secure: false,
        }
    }
}
