//! Migration runner: version tracking, forward-only, transactional per migration.

mod v001_initial_schema;
mod v002_sessions;

use rusqlite::Connection;
use tracing::{debug, info, warn};

use bazaar_core::errors::{BazaarError, BazaarResult, StorageError};

use crate::to_storage_err;

/// Total number of migrations.
pub const LATEST_VERSION: u32 = 2;

type MigrationFn = fn(&Connection) -> BazaarResult<()>;

const MIGRATIONS: [(u32, &str, MigrationFn); 2] = [
    (1, "initial_schema", v001_initial_schema::migrate),
    (2, "sessions", v002_sessions::migrate),
];

/// Get the current schema version from the database.
/// Returns 0 if the schema_version table doesn't exist yet.
pub fn current_version(conn: &Connection) -> BazaarResult<u32> {
    let exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(to_storage_err)?;

    if !exists {
        return Ok(0);
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(to_storage_err)
}

/// Run all pending migrations. Returns how many were applied.
pub fn run_migrations(conn: &Connection) -> BazaarResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(to_storage_err)?;

    let current = current_version(conn)?;
    if current >= LATEST_VERSION {
        debug!("database schema is up to date (v{current})");
        return Ok(0);
    }

    info!("running migrations: v{} → v{}", current, LATEST_VERSION);

    let mut applied = 0;
    for &(version, name, migrate_fn) in &MIGRATIONS {
        if version <= current {
            continue;
        }

        debug!("applying migration v{version:03}: {name}");
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(to_storage_err)?;

        let outcome = migrate_fn(conn).and_then(|()| {
            conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
                .map(|_| ())
                .map_err(to_storage_err)
        });

        match outcome {
            Ok(()) => {
                conn.execute_batch("COMMIT").map_err(to_storage_err)?;
                info!("applied migration v{version:03}: {name}");
                applied += 1;
            }
            Err(e) => {
                warn!("migration v{version:03} failed: {e}, rolling back");
                let _ = conn.execute_batch("ROLLBACK");
                return Err(BazaarError::Storage(StorageError::MigrationFailed {
                    version,
                    message: e.to_string(),
                }));
            }
        }
    }

    Ok(applied)
}
