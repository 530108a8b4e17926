//! Role-based access control.
//!
//! [`allow`] is a pure decision over `(identity, action, resource)`.
//! Anything not listed below is denied.
//!
//! | Role | Allowed |
//! |------|---------|
//! | customer | view own dashboard, view products, place orders for self, view own orders |
//! | seller | view own dashboard, create/view/edit/delete own products |
//! | admin | view own dashboard, view/delete users (never an admin), view/delete any product, view/delete any order |
//!
//! Resources come in two flavours. Collection targets (`Users`, `Products`,
//! `Orders`) are checked before a row is loaded and answer "may this role
//! attempt the action at all". Instance targets (`User`, `Product`, `Order`)
//! carry the loaded row's owner or role and answer the ownership question.

use std::fmt;

use crate::errors::BazaarError;
use crate::identity::{Identity, Principal};
use crate::models::{Role, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The landing page of a role.
    Dashboard(Role),
    /// The user directory, or some user not loaded yet.
    Users,
    /// A loaded user account.
    User { role: Role },
    /// The whole catalog, or some product not loaded yet.
    Products,
    /// The listings of one seller.
    SellerProducts { seller_id: UserId },
    /// A loaded (or about to be created) product.
    Product { seller_id: UserId },
    /// The order book, or some order not loaded yet.
    Orders,
    /// The order history of one customer.
    CustomerOrders { customer_id: UserId },
    /// A loaded (or about to be placed) order.
    Order { customer_id: Option<UserId> },
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard(role) => write!(f, "{role} dashboard"),
            Self::Users => f.write_str("users"),
            Self::User { role } => write!(f, "{role} account"),
            Self::Products => f.write_str("products"),
            Self::SellerProducts { .. } => f.write_str("seller products"),
            Self::Product { .. } => f.write_str("product"),
            Self::Orders => f.write_str("orders"),
            Self::CustomerOrders { .. } => f.write_str("customer orders"),
            Self::Order { .. } => f.write_str("order"),
        }
    }
}

/// Decide whether `identity` may perform `action` on `resource`.
pub fn allow(identity: &Identity, action: Action, resource: &Resource) -> bool {
    match identity.principal() {
        None => false,
        Some(actor) => match actor.role {
            Role::Customer => customer_may(actor.id, action, resource),
            Role::Seller => seller_may(actor.id, action, resource),
            Role::Admin => admin_may(action, resource),
        },
    }
}

fn customer_may(me: UserId, action: Action, resource: &Resource) -> bool {
    use Action::*;
    match (action, resource) {
        (View, Resource::Dashboard(Role::Customer)) => true,
        (View, Resource::Products) | (View, Resource::Product { .. }) => true,
        (Create, Resource::Orders) => true,
        (Create, Resource::Order { customer_id }) => *customer_id == Some(me),
        (View, Resource::CustomerOrders { customer_id }) => *customer_id == me,
        (View, Resource::Order { customer_id }) => *customer_id == Some(me),
        _ => false,
    }
}

fn seller_may(me: UserId, action: Action, resource: &Resource) -> bool {
    use Action::*;
    match (action, resource) {
        (View, Resource::Dashboard(Role::Seller)) => true,
        (View, Resource::SellerProducts { seller_id }) => *seller_id == me,
        (Create | View | Update | Delete, Resource::Product { seller_id }) => *seller_id == me,
        (Update | Delete, Resource::Products) => true,
        _ => false,
    }
}

fn admin_may(action: Action, resource: &Resource) -> bool {
    use Action::*;
    match (action, resource) {
        (View, Resource::Dashboard(Role::Admin)) => true,
        (View | Delete, Resource::Users) => true,
        (View, Resource::User { .. }) => true,
        (Delete, Resource::User { role }) => *role != Role::Admin,
        (View | Delete, Resource::Products) | (View | Delete, Resource::Product { .. }) => true,
        (View | Delete, Resource::Orders) | (View | Delete, Resource::Order { .. }) => true,
        _ => false,
    }
}

/// The acting principal, or `AuthenticationRequired` for anonymous callers.
pub fn authenticated(identity: &Identity) -> Result<&Principal, BazaarError> {
    identity
        .principal()
        .ok_or(BazaarError::AuthenticationRequired)
}

/// Like [`allow`], but returns the acting principal or the error to surface.
///
/// Anonymous callers get `AuthenticationRequired`; authenticated callers that
/// fail the rule get `AuthorizationDenied`.
pub fn check<'a>(
    identity: &'a Identity,
    action: Action,
    resource: &Resource,
) -> Result<&'a Principal, BazaarError> {
    let actor = authenticated(identity)?;

    if allow(identity, action, resource) {
        Ok(actor)
    } else {
        tracing::warn!(
            user_id = %actor.id,
            role = %actor.role,
            %action,
            %resource,
            "access denied"
        );
        Err(BazaarError::AuthorizationDenied {
            action: action.to_string(),
            resource: resource.to_string(),
        })
    }
}
