//! HTTP handlers, one module per route scope.
//!
//! Read-only routes answer with the requested data as JSON. Routes that
//! change state answer with a [`Notice`](bazaar_core::Notice) carrying the
//! redirect a browser client should follow.

pub mod home;
pub mod orders;
pub mod products;
pub mod users;

use serde::Serialize;

/// JSON description of an HTML form, served by the GET side of form routes.
#[derive(Debug, Serialize)]
pub struct FormSpec {
    pub action: String,
    pub method: &'static str,
    pub fields: &'static [&'static str],
    /// Current values for edit forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
}

impl FormSpec {
    pub fn post(action: impl Into<String>, fields: &'static [&'static str]) -> Self {
        Self {
            action: action.into(),
            method: "POST",
            fields,
            values: None,
        }
    }

    pub fn with_values<T: Serialize>(mut self, values: &T) -> Self {
        self.values = serde_json::to_value(values).ok();
        self
    }
}
