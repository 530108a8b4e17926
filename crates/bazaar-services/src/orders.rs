//! Order placement and order listings.
//!
//! Placing an order does not touch product stock.

use tracing::info;

use bazaar_core::errors::{BazaarError, BazaarResult};
use bazaar_core::identity::Identity;
use bazaar_core::models::{Order, OrderId, OrderLine, OrderRecord, ProductId, UserId, UNKNOWN};
use bazaar_core::policy::{self, Action, Resource};
use bazaar_storage::queries::{orders, products, users};
use bazaar_storage::UnitOfWork;
use rusqlite::Connection;

/// Quantity of every order placed through the storefront.
pub const DEFAULT_QUANTITY: i64 = 1;

pub fn place_order(uow: &UnitOfWork<'_>, identity: &Identity, product_id: ProductId) -> BazaarResult<Order> {
    let actor = policy::check(identity, Action::Create, &Resource::Orders)?;
    let conn = uow.conn();
    let product = products::get_product(conn, product_id)?
        .ok_or(BazaarError::not_found("Product", product_id))?;
    policy::check(identity, Action::Create, &Resource::Order { customer_id: Some(actor.id) })?;

    let order = orders::insert_order(conn, actor.id, product.id, DEFAULT_QUANTITY)?;
    info!(customer_id = %actor.id, product_id = %product.id, order_id = %order.id, "order placed");
    Ok(order)
}

/// The calling customer's order history.
pub fn list_my_orders(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<Vec<OrderLine>> {
    let me = policy::authenticated(identity)?.id;
    policy::check(identity, Action::View, &Resource::CustomerOrders { customer_id: me })?;

    let conn = uow.conn();
    orders::list_by_customer(conn, me)?
        .into_iter()
        .map(|o| -> BazaarResult<OrderLine> {
            Ok(OrderLine {
                id: o.id,
                product_name: product_name(conn, o.product_id)?,
                quantity: o.quantity,
            })
        })
        .collect()
}

/// Every order, with customer and product names resolved.
pub fn list_all_orders(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<Vec<OrderRecord>> {
    policy::check(identity, Action::View, &Resource::Orders)?;

    let conn = uow.conn();
    orders::list_orders(conn)?
        .into_iter()
        .map(|o| -> BazaarResult<OrderRecord> {
            Ok(OrderRecord {
                id: o.id,
                customer_name: customer_name(conn, o.customer_id)?,
                product_name: product_name(conn, o.product_id)?,
                quantity: o.quantity,
            })
        })
        .collect()
}

/// A single order: admins see any, customers their own.
pub fn get_order(uow: &UnitOfWork<'_>, identity: &Identity, id: OrderId) -> BazaarResult<OrderRecord> {
    policy::authenticated(identity)?;
    let conn = uow.conn();
    let order = orders::get_order(conn, id)?.ok_or(BazaarError::not_found("Order", id))?;
    policy::check(identity, Action::View, &Resource::Order { customer_id: order.customer_id })?;

    Ok(OrderRecord {
        id: order.id,
        customer_name: customer_name(conn, order.customer_id)?,
        product_name: product_name(conn, order.product_id)?,
        quantity: order.quantity,
    })
}

pub fn delete_order(uow: &UnitOfWork<'_>, identity: &Identity, id: OrderId) -> BazaarResult<Order> {
    let actor = policy::check(identity, Action::Delete, &Resource::Orders)?;
    let conn = uow.conn();
    let order = orders::get_order(conn, id)?.ok_or(BazaarError::not_found("Order", id))?;
    policy::check(identity, Action::Delete, &Resource::Order { customer_id: order.customer_id })?;

    orders::delete_order(conn, id)?;
    info!(admin_id = %actor.id, order_id = %id, "order deleted");
    Ok(order)
}

fn product_name(conn: &Connection, id: Option<ProductId>) -> BazaarResult<String> {
    let Some(id) = id else {
        return Ok(UNKNOWN.to_string());
    };
    Ok(products::get_product(conn, id)?
        .map(|p| p.name)
        .unwrap_or_else(|| UNKNOWN.to_string()))
}

fn customer_name(conn: &Connection, id: Option<UserId>) -> BazaarResult<String> {
    let Some(id) = id else {
        return Ok(UNKNOWN.to_string());
    };
    Ok(users::get_user(conn, id)?
        .map(|u| u.username)
        .unwrap_or_else(|| UNKNOWN.to_string()))
}
