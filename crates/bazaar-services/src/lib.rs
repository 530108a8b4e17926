//! # bazaar-services
//!
//! Every operation takes the caller's [`Identity`](bazaar_core::Identity) and a
//! [`UnitOfWork`](bazaar_storage::UnitOfWork), consults the access policy
//! first, and performs at most one persisted mutation.

pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod password;
pub mod products;
pub mod provisioning;
pub mod users;

pub use auth::Session;
