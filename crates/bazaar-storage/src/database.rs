//! Database handle and per-request unit of work.
//!
//! The only place in the workspace that holds `Mutex<Connection>`.
//! Services never see the handle; they receive a [`UnitOfWork`] scoped to
//! one logical operation.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::{debug, info};

use bazaar_core::config::StorageConfig;
use bazaar_core::errors::{BazaarError, BazaarResult, StorageError};

use crate::{migrations, pragmas, to_storage_err};

pub struct Database {
    conn: Mutex<Connection>,
}

/// One transaction on the shared connection.
///
/// Committed by [`Database::write`]/[`Database::read`] when the closure
/// succeeds, rolled back when it fails.
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl UnitOfWork<'_> {
    pub fn conn(&self) -> &Connection {
        &self.tx
    }
}

impl Database {
    /// Open (or create) a file-backed database and bring its schema up to date.
    pub fn open(path: &Path, busy_timeout_ms: u64) -> BazaarResult<Self> {
        let conn = Connection::open(path).map_err(to_storage_err)?;
        pragmas::apply_pragmas(&conn, busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;
        info!(path = %path.display(), "database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database with the full schema.
    pub fn open_in_memory() -> BazaarResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_storage_err)?;
        pragmas::apply_in_memory_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        debug!("in-memory database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn from_config(config: &StorageConfig) -> BazaarResult<Self> {
        if config.in_memory {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(&config.path), config.effective_busy_timeout_ms())
        }
    }

    /// Run `f` in an immediate (write-locking) transaction.
    pub fn write<F, T>(&self, f: F) -> BazaarResult<T>
    where
        F: FnOnce(&UnitOfWork<'_>) -> BazaarResult<T>,
    {
        self.run(TransactionBehavior::Immediate, f)
    }

    /// Run `f` in a deferred transaction for consistent multi-query reads.
    pub fn read<F, T>(&self, f: F) -> BazaarResult<T>
    where
        F: FnOnce(&UnitOfWork<'_>) -> BazaarResult<T>,
    {
        self.run(TransactionBehavior::Deferred, f)
    }

    fn run<F, T>(&self, behavior: TransactionBehavior, f: F) -> BazaarResult<T>
    where
        F: FnOnce(&UnitOfWork<'_>) -> BazaarResult<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| BazaarError::Storage(StorageError::LockPoisoned))?;
        let tx = conn
            .transaction_with_behavior(behavior)
            .map_err(to_storage_err)?;
        let uow = UnitOfWork { tx };

        // Dropping an uncommitted transaction rolls it back.
        let value = f(&uow)?;
        uow.tx.commit().map_err(to_storage_err)?;
        Ok(value)
    }
}
