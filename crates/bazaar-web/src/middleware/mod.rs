//! Request middleware.

pub mod logging;
pub mod session;

pub use logging::log_requests;
pub use session::SessionMiddleware;
