//! Insert, lookup, list and delete for user accounts.

use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use bazaar_core::errors::{BazaarError, BazaarResult};
use bazaar_core::models::{NewUser, Role, User, UserId};

use crate::to_storage_err;

const COLUMNS: &str = "id, username, email, password_hash, role";

pub(crate) fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(4)?;
    let role = role
        .parse::<Role>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(User {
        id: UserId(row.get(0)?),
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role,
    })
}

/// Insert a user. A uniqueness violation maps to `DuplicateKey`.
pub fn insert_user(conn: &Connection, user: &NewUser) -> BazaarResult<User> {
    conn.execute(
        "INSERT INTO users (username, email, password_hash, role) VALUES (?1, ?2, ?3, ?4)",
        params![user.username, user.email, user.password_hash, user.role.as_str()],
    )
    .map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) if e.to_string().contains("users.username") => {
            BazaarError::DuplicateKey { field: "username" }
        }
        Some(ErrorCode::ConstraintViolation) if e.to_string().contains("users.email") => {
            BazaarError::DuplicateKey { field: "email" }
        }
        _ => to_storage_err(e),
    })?;

    Ok(User {
        id: UserId(conn.last_insert_rowid()),
        username: user.username.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        role: user.role,
    })
}

pub fn get_user(conn: &Connection, id: UserId) -> BazaarResult<Option<User>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM users WHERE id = ?1"),
        params![id.0],
        row_to_user,
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn find_by_username(conn: &Connection, username: &str) -> BazaarResult<Option<User>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM users WHERE username = ?1"),
        params![username],
        row_to_user,
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn find_by_email(conn: &Connection, email: &str) -> BazaarResult<Option<User>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM users WHERE email = ?1"),
        params![email],
        row_to_user,
    )
    .optional()
    .map_err(to_storage_err)
}

/// All users, oldest first.
pub fn list_users(conn: &Connection) -> BazaarResult<Vec<User>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM users ORDER BY id"))
        .map_err(to_storage_err)?;
    let rows = stmt.query_map([], row_to_user).map_err(to_storage_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)
}

/// Delete a user. Returns `false` if no row matched.
pub fn delete_user(conn: &Connection, id: UserId) -> BazaarResult<bool> {
    let affected = conn
        .execute("DELETE FROM users WHERE id = ?1", params![id.0])
        .map_err(to_storage_err)?;
    Ok(affected > 0)
}

pub fn count_users(conn: &Connection) -> BazaarResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(to_storage_err)
}
