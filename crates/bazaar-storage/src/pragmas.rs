//! Connection PRAGMAs applied to every connection on open.

use std::time::Duration;

use rusqlite::Connection;

use bazaar_core::errors::BazaarResult;

use crate::to_storage_err;

/// Configure a file-backed connection: WAL, enforced foreign keys, busy timeout.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u64) -> BazaarResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(to_storage_err)?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))
        .map_err(to_storage_err)?;
    Ok(())
}

/// In-memory databases have no WAL; only referential integrity matters.
pub fn apply_in_memory_pragmas(conn: &Connection) -> BazaarResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(to_storage_err)
}

/// Whether foreign key enforcement is active on `conn`.
pub fn foreign_keys_enabled(conn: &Connection) -> BazaarResult<bool> {
    let on: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(on == 1)
}
