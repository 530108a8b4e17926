//! Access log: one line per request, tagged with the caller the session
//! middleware resolved.

use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage};
use tracing::{info, warn};

use crate::extract::Caller;

/// Install with `actix_web::middleware::from_fn(log_requests)`, outside
/// [`SessionMiddleware`](super::SessionMiddleware).
pub async fn log_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();
    let path = req.path().to_owned();
    let start = Instant::now();

    let outcome = next.call(req).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let res = match outcome {
        Ok(res) => res,
        Err(e) => {
            warn!(%method, %path, error = %e, duration_ms, "request failed");
            return Err(e);
        }
    };

    let (user_id, role) = caller_fields(&res);
    let status = res.status().as_u16();
    if res.status().is_client_error() || res.status().is_server_error() {
        warn!(%method, %path, status, user_id, role, duration_ms, "request rejected");
    } else {
        info!(%method, %path, status, user_id, role, duration_ms, "request served");
    }
    Ok(res)
}

fn caller_fields<B>(res: &ServiceResponse<B>) -> (Option<i64>, Option<&'static str>) {
    let extensions = res.request().extensions();
    match extensions.get::<Caller>().and_then(|c| c.identity.principal()) {
        Some(me) => (Some(me.id.0), Some(me.role.as_str())),
        None => (None, None),
    }
}
