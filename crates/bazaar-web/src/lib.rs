//! # bazaar-web
//!
//! actix-web surface of the storefront. Handlers turn form posts into
//! service calls and answer with JSON [`Notice`](bazaar_core::Notice)s.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use state::AppState;

use actix_web::web;

/// Register every route of the storefront.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(extract::reject_form))
        .configure(handlers::home::configure)
        .configure(handlers::users::configure)
        .configure(handlers::products::configure)
        .configure(handlers::orders::configure);
}
