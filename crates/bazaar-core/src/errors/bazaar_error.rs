use super::error_code::{self, ErrorCode};
use super::StorageError;

/// Top-level error type for the storefront.
/// Every variant is recovered at the request boundary and rendered as a notice.
#[derive(Debug, thiserror::Error)]
pub enum BazaarError {
    #[error("Please log in to continue")]
    AuthenticationRequired,

    #[error("Access denied: cannot {action} {resource}")]
    AuthorizationDenied { action: String, resource: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{field} already exists")]
    DuplicateKey { field: &'static str },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BazaarError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for failures caused by the server rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::PasswordHash(_) | Self::Config(_)
        )
    }
}

impl ErrorCode for BazaarError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => error_code::AUTH_REQUIRED,
            Self::AuthorizationDenied { .. } => error_code::FORBIDDEN,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::DuplicateKey { .. } => error_code::DUPLICATE_KEY,
            Self::Validation(_) => error_code::VALIDATION_ERROR,
            Self::InvalidCredentials => error_code::INVALID_CREDENTIALS,
            Self::Storage(e) => e.error_code(),
            Self::Config(_) => error_code::CONFIG_ERROR,
            Self::PasswordHash(_) => error_code::INTERNAL_ERROR,
        }
    }
}

/// Convenience type alias.
pub type BazaarResult<T> = Result<T, BazaarError>;
