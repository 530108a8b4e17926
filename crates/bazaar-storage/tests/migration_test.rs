//! Schema migrations and referential integrity.

use bazaar_storage::migrations;
use bazaar_storage::pragmas::{apply_in_memory_pragmas, apply_pragmas, foreign_keys_enabled};
use bazaar_storage::Database;
use rusqlite::Connection;
use tempfile::TempDir;

fn get_table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    columns
}

#[test]
fn migrations_create_all_tables() {
    let conn = Connection::open_in_memory().unwrap();
    apply_in_memory_pragmas(&conn).unwrap();
    let applied = migrations::run_migrations(&conn).unwrap();

    assert_eq!(applied, migrations::LATEST_VERSION);
    assert_eq!(migrations::current_version(&conn).unwrap(), migrations::LATEST_VERSION);

    let users = get_table_columns(&conn, "users");
    for col in ["id", "username", "email", "password_hash", "role"] {
        assert!(users.contains(&col.to_string()), "users.{col}");
    }
    let products = get_table_columns(&conn, "products");
    for col in ["id", "name", "price", "stock", "seller_id"] {
        assert!(products.contains(&col.to_string()), "products.{col}");
    }
    let orders = get_table_columns(&conn, "orders");
    for col in ["id", "customer_id", "product_id", "quantity"] {
        assert!(orders.contains(&col.to_string()), "orders.{col}");
    }
    let sessions = get_table_columns(&conn, "sessions");
    assert!(sessions.contains(&"token".to_string()));
    assert!(sessions.contains(&"user_id".to_string()));
}

#[test]
fn migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    migrations::run_migrations(&conn).unwrap();
    assert_eq!(migrations::run_migrations(&conn).unwrap(), 0);
}

#[test]
fn file_backed_database_reopens_at_latest_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bazaar.db");

    {
        let conn = Connection::open(&path).unwrap();
        apply_pragmas(&conn, 1000).unwrap();
        assert!(foreign_keys_enabled(&conn).unwrap());
        migrations::run_migrations(&conn).unwrap();
    }

    let db = Database::open(&path, 1000).unwrap();
    let version = db
        .read(|uow| migrations::current_version(uow.conn()))
        .unwrap();
    assert_eq!(version, migrations::LATEST_VERSION);
}

#[test]
fn role_column_rejects_values_outside_the_enum() {
    let conn = Connection::open_in_memory().unwrap();
    migrations::run_migrations(&conn).unwrap();
    let result = conn.execute(
        "INSERT INTO users (username, email, password_hash, role) VALUES ('x', 'x@x', 'h', 'root')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn product_requires_an_existing_seller() {
    let db = Database::open_in_memory().unwrap();
    let result = db.write(|uow| {
        uow.conn()
            .execute(
                "INSERT INTO products (name, price, stock, seller_id) VALUES ('Ghost', 1.0, 1, 999)",
                [],
            )
            .map_err(bazaar_storage::to_storage_err)
    });
    assert!(result.is_err());
}
