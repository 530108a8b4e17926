//! v002: server-side login sessions. A session dies with its user.

use rusqlite::Connection;

use bazaar_core::errors::BazaarResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> BazaarResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sessions (
            token      TEXT PRIMARY KEY,
            user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
        ",
    )
    .map_err(to_storage_err)?;
    Ok(())
}
