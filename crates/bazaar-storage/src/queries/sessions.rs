//! Server-side login sessions keyed by an opaque token.

use rusqlite::{params, Connection, OptionalExtension};

use bazaar_core::errors::BazaarResult;
use bazaar_core::models::{User, UserId};

use crate::queries::users::row_to_user;
use crate::to_storage_err;

pub fn create_session(conn: &Connection, token: &str, user_id: UserId) -> BazaarResult<()> {
    conn.execute(
        "INSERT INTO sessions (token, user_id) VALUES (?1, ?2)",
        params![token, user_id.0],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// SQLite modifier selecting the oldest `created_at` still considered live.
fn age_modifier(max_age_secs: i64) -> String {
    format!("-{max_age_secs} seconds")
}

/// The user bound to `token`, if the session exists and is younger than `max_age_secs`.
pub fn resolve_session(conn: &Connection, token: &str, max_age_secs: i64) -> BazaarResult<Option<User>> {
    conn.query_row(
        "SELECT u.id, u.username, u.email, u.password_hash, u.role
         FROM sessions s JOIN users u ON u.id = s.user_id
         WHERE s.token = ?1
           AND s.created_at >= strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?2)",
        params![token, age_modifier(max_age_secs)],
        row_to_user,
    )
    .optional()
    .map_err(to_storage_err)
}

/// Delete every session older than `max_age_secs`. Returns the number removed.
pub fn prune_sessions(conn: &Connection, max_age_secs: i64) -> BazaarResult<usize> {
    conn.execute(
        "DELETE FROM sessions
         WHERE created_at < strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?1)",
        params![age_modifier(max_age_secs)],
    )
    .map_err(to_storage_err)
}

/// Remove a session. Returns `false` if it did not exist.
pub fn delete_session(conn: &Connection, token: &str) -> BazaarResult<bool> {
    let affected = conn
        .execute("DELETE FROM sessions WHERE token = ?1", params![token])
        .map_err(to_storage_err)?;
    Ok(affected > 0)
}

pub fn count_sessions_for_user(conn: &Connection, user_id: UserId) -> BazaarResult<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE user_id = ?1",
        params![user_id.0],
        |row| row.get(0),
    )
    .map_err(to_storage_err)
}
