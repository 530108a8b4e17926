//! Session middleware: turns the session cookie into a [`Caller`].

use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use bazaar_services::auth;

use crate::extract::Caller;
use crate::state::AppState;

pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req.app_data::<web::Data<AppState>>().cloned();
            let token = state.as_ref().and_then(|state| {
                req.cookie(&state.session.cookie_name)
                    .map(|c| c.value().to_string())
                    .filter(|t| !t.is_empty())
            });

            if let (Some(state), Some(token)) = (state, token) {
                let lookup = token.clone();
                match state
                    .read(move |uow| auth::current_identity(uow, Some(lookup.as_str())))
                    .await
                {
                    Ok(identity) if !identity.is_anonymous() => {
                        req.extensions_mut().insert(Caller {
                            identity,
                            token: Some(token),
                        });
                    }
                    Ok(_) => debug!("session cookie does not match a live session"),
                    // Resolution failures degrade to an anonymous request.
                    Err(e) => warn!(error = %e, "session lookup failed"),
                }
            }

            service.call(req).await
        })
    }
}
