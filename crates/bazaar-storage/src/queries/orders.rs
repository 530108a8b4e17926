//! Insert, lookup, list and delete for orders. Orders are never updated.

use rusqlite::{params, Connection, OptionalExtension, Row};

use bazaar_core::errors::BazaarResult;
use bazaar_core::models::{Order, OrderId, ProductId, UserId};

use crate::to_storage_err;

const COLUMNS: &str = "id, customer_id, product_id, quantity";

fn row_to_order(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: OrderId(row.get(0)?),
        customer_id: row.get::<_, Option<i64>>(1)?.map(UserId),
        product_id: row.get::<_, Option<i64>>(2)?.map(ProductId),
        quantity: row.get(3)?,
    })
}

pub fn insert_order(
    conn: &Connection,
    customer_id: UserId,
    product_id: ProductId,
    quantity: i64,
) -> BazaarResult<Order> {
    conn.execute(
        "INSERT INTO orders (customer_id, product_id, quantity) VALUES (?1, ?2, ?3)",
        params![customer_id.0, product_id.0, quantity],
    )
    .map_err(to_storage_err)?;

    Ok(Order {
        id: OrderId(conn.last_insert_rowid()),
        customer_id: Some(customer_id),
        product_id: Some(product_id),
        quantity,
    })
}

pub fn get_order(conn: &Connection, id: OrderId) -> BazaarResult<Option<Order>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM orders WHERE id = ?1"),
        params![id.0],
        row_to_order,
    )
    .optional()
    .map_err(to_storage_err)
}

/// Every order, oldest first.
pub fn list_orders(conn: &Connection) -> BazaarResult<Vec<Order>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM orders ORDER BY id"))
        .map_err(to_storage_err)?;
    let rows = stmt.query_map([], row_to_order).map_err(to_storage_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)
}

pub fn list_by_customer(conn: &Connection, customer_id: UserId) -> BazaarResult<Vec<Order>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM orders WHERE customer_id = ?1 ORDER BY id"
        ))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![customer_id.0], row_to_order)
        .map_err(to_storage_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)
}

/// Delete an order. Returns `false` if no row matched.
pub fn delete_order(conn: &Connection, id: OrderId) -> BazaarResult<bool> {
    let affected = conn
        .execute("DELETE FROM orders WHERE id = ?1", params![id.0])
        .map_err(to_storage_err)?;
    Ok(affected > 0)
}

pub fn count_orders(conn: &Connection) -> BazaarResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        .map_err(to_storage_err)
}
