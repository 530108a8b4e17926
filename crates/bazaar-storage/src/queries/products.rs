//! Insert, lookup, list, update and delete for product listings.

use rusqlite::{params, Connection, OptionalExtension, Row};

use bazaar_core::errors::BazaarResult;
use bazaar_core::models::{Product, ProductDraft, ProductId, UserId};

use crate::to_storage_err;

const COLUMNS: &str = "id, name, price, stock, seller_id";

fn row_to_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: ProductId(row.get(0)?),
        name: row.get(1)?,
        price: row.get(2)?,
        stock: row.get(3)?,
        seller_id: UserId(row.get(4)?),
    })
}

pub fn insert_product(
    conn: &Connection,
    seller_id: UserId,
    draft: &ProductDraft,
) -> BazaarResult<Product> {
    conn.execute(
        "INSERT INTO products (name, price, stock, seller_id) VALUES (?1, ?2, ?3, ?4)",
        params![draft.name, draft.price, draft.stock, seller_id.0],
    )
    .map_err(to_storage_err)?;

    Ok(Product {
        id: ProductId(conn.last_insert_rowid()),
        name: draft.name.clone(),
        price: draft.price,
        stock: draft.stock,
        seller_id,
    })
}

pub fn get_product(conn: &Connection, id: ProductId) -> BazaarResult<Option<Product>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM products WHERE id = ?1"),
        params![id.0],
        row_to_product,
    )
    .optional()
    .map_err(to_storage_err)
}

/// The whole catalog, oldest first.
pub fn list_products(conn: &Connection) -> BazaarResult<Vec<Product>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM products ORDER BY id"))
        .map_err(to_storage_err)?;
    let rows = stmt.query_map([], row_to_product).map_err(to_storage_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)
}

pub fn list_by_seller(conn: &Connection, seller_id: UserId) -> BazaarResult<Vec<Product>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM products WHERE seller_id = ?1 ORDER BY id"
        ))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![seller_id.0], row_to_product)
        .map_err(to_storage_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)
}

/// Overwrite name, price and stock. Returns `false` if no row matched.
pub fn update_product(conn: &Connection, id: ProductId, draft: &ProductDraft) -> BazaarResult<bool> {
    let affected = conn
        .execute(
            "UPDATE products SET name = ?2, price = ?3, stock = ?4 WHERE id = ?1",
            params![id.0, draft.name, draft.price, draft.stock],
        )
        .map_err(to_storage_err)?;
    Ok(affected > 0)
}

/// Delete a product. Returns `false` if no row matched.
pub fn delete_product(conn: &Connection, id: ProductId) -> BazaarResult<bool> {
    let affected = conn
        .execute("DELETE FROM products WHERE id = ?1", params![id.0])
        .map_err(to_storage_err)?;
    Ok(affected > 0)
}

pub fn count_products(conn: &Connection) -> BazaarResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .map_err(to_storage_err)
}
