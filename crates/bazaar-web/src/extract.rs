//! Request extractors.

use actix_web::dev::Payload;
use actix_web::error::UrlencodedError;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ok, Ready};

use bazaar_core::identity::Identity;
use bazaar_core::BazaarError;

use crate::error::WebError;

/// Who is calling, as resolved by [`SessionMiddleware`](crate::middleware::SessionMiddleware).
///
/// Requests that did not pass through the middleware, or carry no valid
/// session cookie, extract as anonymous.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    pub identity: Identity,
    /// The session token the identity was resolved from.
    pub token: Option<String>,
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ok(req.extensions().get::<Caller>().cloned().unwrap_or_default())
    }
}

/// `FormConfig` error handler: a body that does not decode is a validation
/// failure rendered as a notice.
pub fn reject_form(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    WebError::from(BazaarError::Validation(err.to_string())).into()
}

/// Decode a form body that was extracted lazily, so handlers can run the
/// access check before looking at it.
pub fn form_body<T>(form: Result<web::Form<T>, actix_web::Error>) -> Result<T, WebError> {
    form.map(web::Form::into_inner).map_err(|e| {
        let message = match e.as_error::<WebError>() {
            Some(WebError::App {
                source: BazaarError::Validation(message),
                ..
            }) => message.clone(),
            _ => e.to_string(),
        };
        BazaarError::Validation(message).into()
    })
}
