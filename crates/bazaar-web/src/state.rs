//! Shared application state.

use std::sync::Arc;

use actix_web::web;

use bazaar_core::config::SessionConfig;
use bazaar_core::errors::BazaarResult;
use bazaar_storage::{Database, UnitOfWork};

use crate::error::WebError;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub session: SessionConfig,
}

impl AppState {
    pub fn new(db: Database, session: SessionConfig) -> Self {
        Self {
            db: Arc::new(db),
            session,
        }
    }

    /// Run a write unit of work on the blocking pool.
    pub async fn write<F, T>(&self, f: F) -> Result<T, WebError>
    where
        F: FnOnce(&UnitOfWork<'_>) -> BazaarResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        Ok(web::block(move || db.write(f)).await??)
    }

    /// Run a read-only unit of work on the blocking pool.
    pub async fn read<F, T>(&self, f: F) -> Result<T, WebError>
    where
        F: FnOnce(&UnitOfWork<'_>) -> BazaarResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        Ok(web::block(move || db.read(f)).await??)
    }
}
