//! Per-role landing pages.

use serde::Serialize;

use bazaar_core::errors::BazaarResult;
use bazaar_core::identity::{Identity, Principal};
use bazaar_core::models::{Product, Role};
use bazaar_core::policy::{self, Action, Resource};
use bazaar_storage::queries::{orders, products, users};
use bazaar_storage::UnitOfWork;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerDashboard {
    pub user: Principal,
    pub order_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellerDashboard {
    pub user: Principal,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub user: Principal,
    pub user_count: i64,
    pub product_count: i64,
    pub order_count: i64,
}

pub fn customer_dashboard(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<CustomerDashboard> {
    let me = policy::check(identity, Action::View, &Resource::Dashboard(Role::Customer))?;
    let order_count = orders::list_by_customer(uow.conn(), me.id)?.len();
    Ok(CustomerDashboard {
        user: me.clone(),
        order_count,
    })
}

pub fn seller_dashboard(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<SellerDashboard> {
    let me = policy::check(identity, Action::View, &Resource::Dashboard(Role::Seller))?;
    Ok(SellerDashboard {
        user: me.clone(),
        products: products::list_by_seller(uow.conn(), me.id)?,
    })
}

pub fn admin_dashboard(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<AdminDashboard> {
    let me = policy::check(identity, Action::View, &Resource::Dashboard(Role::Admin))?;
    let conn = uow.conn();
    Ok(AdminDashboard {
        user: me.clone(),
        user_count: users::count_users(conn)?,
        product_count: products::count_products(conn)?,
        order_count: orders::count_orders(conn)?,
    })
}
