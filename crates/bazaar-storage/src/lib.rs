//! # bazaar-storage
//!
//! SQLite persistence layer for the Bazaar storefront.
//! One serialized connection, one transaction per unit of work,
//! forward-only schema migrations with enforced foreign keys.

pub mod database;
pub mod migrations;
pub mod pragmas;
pub mod queries;

pub use database::{Database, UnitOfWork};

use bazaar_core::errors::{BazaarError, StorageError};

/// Convert a rusqlite failure into a `BazaarError::Storage`.
pub fn to_storage_err(e: rusqlite::Error) -> BazaarError {
    if e.sqlite_error_code() == Some(rusqlite::ErrorCode::DatabaseBusy) {
        return BazaarError::Storage(StorageError::DbBusy);
    }
    BazaarError::Storage(StorageError::SqliteError {
        message: e.to_string(),
    })
}
