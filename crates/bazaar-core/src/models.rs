//! Domain model: users, products, orders and the role enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BazaarError;

/// Placeholder rendered when a joined listing references a row that no longer exists.
pub const UNKNOWN: &str = "Unknown";

/// Longest product name accepted, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

id_type!(
    /// Row id of a user account.
    UserId
);
id_type!(
    /// Row id of a product listing.
    ProductId
);
id_type!(
    /// Row id of a placed order.
    OrderId
);

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Seller,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Customer, Role::Seller, Role::Admin];

    /// The lowercase name stored in the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }

    /// Landing page a freshly logged-in account is sent to.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Customer => "/users/dashboard",
            Self::Seller => "/users/seller/dashboard",
            Self::Admin => "/users/admin/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BazaarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            other => Err(BazaarError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// A stored user account, including the password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Public view of a user account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Fields of a user row that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// A product listing owned by a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub seller_id: UserId,
}

/// Validated name/price/stock for creating or editing a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl ProductDraft {
    /// Validate raw form input.
    pub fn parse(name: &str, price: &str, stock: &str) -> Result<Self, BazaarError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BazaarError::Validation("name is required".to_string()));
        }
        if name.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(BazaarError::Validation(format!(
                "name must be at most {MAX_PRODUCT_NAME_LEN} characters"
            )));
        }

        let price: f64 = price
            .trim()
            .parse()
            .map_err(|_| BazaarError::Validation(format!("price is not a number: {price:?}")))?;
        if !price.is_finite() || price < 0.0 {
            return Err(BazaarError::Validation(
                "price must be a non-negative number".to_string(),
            ));
        }

        let stock: i64 = stock
            .trim()
            .parse()
            .map_err(|_| BazaarError::Validation(format!("stock is not an integer: {stock:?}")))?;
        if stock < 0 {
            return Err(BazaarError::Validation("stock must not be negative".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            price,
            stock,
        })
    }
}

/// A placed order. References are `None` once the referenced row was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: Option<UserId>,
    pub product_id: Option<ProductId>,
    pub quantity: i64,
}

/// One row of a customer's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderId,
    pub product_name: String,
    pub quantity: i64,
}

/// One row of the admin order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub customer_name: String,
    pub product_name: String,
    pub quantity: i64,
}
