//! Structured request outcome, returned to the presentation layer in place
//! of flash messages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
    /// Machine-readable error code; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    /// Where a browser client should go next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            code: None,
            redirect: None,
            data: None,
        }
    }

    pub fn danger(message: impl Into<String>, code: &'static str) -> Self {
        Self {
            level: Level::Danger,
            message: message.into(),
            code: Some(code),
            redirect: None,
            data: None,
        }
    }

    pub fn redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }

    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    pub fn is_success(&self) -> bool {
        self.level == Level::Success
    }
}
