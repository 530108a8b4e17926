//! Mapping of service errors onto HTTP responses.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use bazaar_core::errors::error_code::{self, ErrorCode};
use bazaar_core::errors::BazaarError;
use bazaar_core::Notice;

pub const LOGIN_PAGE: &str = "/users/login";

/// Error returned by handlers.
///
/// Authentication and authorization failures always point the client at the
/// login page. Other errors carry the redirect hint chosen by the handler.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("{source}")]
    App {
        source: BazaarError,
        redirect: Option<String>,
    },

    #[error("blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl From<BazaarError> for WebError {
    fn from(source: BazaarError) -> Self {
        Self::App {
            source,
            redirect: None,
        }
    }
}

impl WebError {
    pub fn redirect_to(self, to: impl Into<String>) -> Self {
        match self {
            Self::App { source, .. } => Self::App {
                source,
                redirect: Some(to.into()),
            },
            other => other,
        }
    }

    fn notice(&self) -> Notice {
        match self {
            Self::App { source, redirect } => {
                let hint = match source {
                    BazaarError::AuthenticationRequired
                    | BazaarError::AuthorizationDenied { .. }
                    | BazaarError::InvalidCredentials => Some(LOGIN_PAGE.to_string()),
                    _ => redirect.clone(),
                };
                let notice = Notice::danger(user_message(source), source.error_code());
                match hint {
                    Some(to) => notice.redirect(to),
                    None => notice,
                }
            }
            Self::Blocking(_) => Notice::danger(GENERIC_FAILURE, error_code::INTERNAL_ERROR),
        }
    }
}

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

fn user_message(e: &BazaarError) -> String {
    match e {
        BazaarError::AuthenticationRequired => "Please log in to access this page.".to_string(),
        BazaarError::AuthorizationDenied { .. } => "Access denied!".to_string(),
        BazaarError::NotFound { entity, .. } => format!("{entity} not found!"),
        BazaarError::DuplicateKey { field: "username" } => "Username already exists!".to_string(),
        BazaarError::DuplicateKey { field: "email" } => "Email already registered!".to_string(),
        BazaarError::DuplicateKey { field } => format!("{field} already exists!"),
        BazaarError::Validation(msg) => format!("Invalid input: {msg}"),
        BazaarError::InvalidCredentials => "Invalid email or password!".to_string(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::App { source, .. } => match source {
                BazaarError::AuthenticationRequired | BazaarError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                BazaarError::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
                BazaarError::NotFound { .. } => StatusCode::NOT_FOUND,
                BazaarError::DuplicateKey { .. } => StatusCode::CONFLICT,
                BazaarError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::App { source, .. } if source.is_internal() => {
                error!(error = %source, code = source.error_code(), "request failed");
            }
            Self::Blocking(e) => error!(error = %e, "request failed"),
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(self.notice())
    }
}

/// Attach a redirect hint to the error side of a result.
pub trait OrRedirect<T> {
    fn or_redirect(self, to: &str) -> Result<T, WebError>;
}

impl<T, E: Into<WebError>> OrRedirect<T> for Result<T, E> {
    fn or_redirect(self, to: &str) -> Result<T, WebError> {
        self.map_err(|e| e.into().redirect_to(to))
    }
}

pub type WebResult<T> = Result<T, WebError>;
