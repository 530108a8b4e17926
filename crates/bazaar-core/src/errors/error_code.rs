//! Stable machine-readable codes surfaced to clients alongside error messages.

pub const AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const DUPLICATE_KEY: &str = "DUPLICATE_KEY";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const DB_BUSY: &str = "DB_BUSY";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Implemented by every error type that crosses the request boundary.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
