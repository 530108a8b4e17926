//! v001: users, products, orders with enforced references.
//!
//! Deleting a seller removes their listings. Deleting a user or product keeps
//! the order row and nulls the dangling reference.

use rusqlite::Connection;

use bazaar_core::errors::BazaarResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> BazaarResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role          TEXT NOT NULL DEFAULT 'customer'
                          CHECK (role IN ('customer', 'seller', 'admin')),
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS products (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 100),
            price     REAL NOT NULL CHECK (price >= 0),
            stock     INTEGER NOT NULL CHECK (stock >= 0),
            seller_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_products_seller ON products(seller_id);

        CREATE TABLE IF NOT EXISTS orders (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            product_id  INTEGER REFERENCES products(id) ON DELETE SET NULL,
            quantity    INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
            placed_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id);
        CREATE INDEX IF NOT EXISTS idx_orders_product ON orders(product_id);
        ",
    )
    .map_err(to_storage_err)?;
    Ok(())
}
