//! # bazaar-core
//!
//! Foundation crate for the Bazaar storefront.
//! Defines the domain model, session identity, the access control policy,
//! errors, config and logging setup. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod errors;
pub mod identity;
pub mod logging;
pub mod models;
pub mod notice;
pub mod policy;

// Re-export the most commonly used types at the crate root.
pub use config::BazaarConfig;
pub use errors::error_code::ErrorCode;
pub use errors::{BazaarError, BazaarResult, StorageError};
pub use identity::{Identity, Principal};
pub use models::{OrderId, ProductId, Role, UserId};
pub use notice::Notice;
pub use policy::{Action, Resource};
