//! Seller listings and the shared catalog.

use tracing::info;

use bazaar_core::errors::{BazaarError, BazaarResult};
use bazaar_core::identity::Identity;
use bazaar_core::models::{Product, ProductDraft, ProductId};
use bazaar_core::policy::{self, Action, Resource};
use bazaar_storage::queries::products;
use bazaar_storage::UnitOfWork;

/// Create a listing owned by the calling seller.
pub fn create_product(
    uow: &UnitOfWork<'_>,
    identity: &Identity,
    draft: &ProductDraft,
) -> BazaarResult<Product> {
    let me = policy::authenticated(identity)?.id;
    policy::check(identity, Action::Create, &Resource::Product { seller_id: me })?;

    let product = products::insert_product(uow.conn(), me, draft)?;
    info!(seller_id = %me, product_id = %product.id, "product created");
    Ok(product)
}

/// A single product. Customers and admins see any product, sellers their own.
pub fn get_product(uow: &UnitOfWork<'_>, identity: &Identity, id: ProductId) -> BazaarResult<Product> {
    policy::authenticated(identity)?;
    let product = load(uow, id)?;
    policy::check(identity, Action::View, &Resource::Product { seller_id: product.seller_id })?;
    Ok(product)
}

/// The product as the owner's edit form should show it.
pub fn get_product_for_edit(
    uow: &UnitOfWork<'_>,
    identity: &Identity,
    id: ProductId,
) -> BazaarResult<Product> {
    policy::check(identity, Action::Update, &Resource::Products)?;
    let product = load(uow, id)?;
    policy::check(identity, Action::Update, &Resource::Product { seller_id: product.seller_id })?;
    Ok(product)
}

pub fn update_product(
    uow: &UnitOfWork<'_>,
    identity: &Identity,
    id: ProductId,
    draft: &ProductDraft,
) -> BazaarResult<Product> {
    let current = get_product_for_edit(uow, identity, id)?;
    if !products::update_product(uow.conn(), id, draft)? {
        return Err(BazaarError::not_found("Product", id));
    }
    info!(seller_id = %current.seller_id, product_id = %id, "product updated");
    Ok(Product {
        id,
        name: draft.name.clone(),
        price: draft.price,
        stock: draft.stock,
        seller_id: current.seller_id,
    })
}

/// Delete a product: its owner or any admin.
pub fn delete_product(uow: &UnitOfWork<'_>, identity: &Identity, id: ProductId) -> BazaarResult<Product> {
    let actor = policy::check(identity, Action::Delete, &Resource::Products)?;
    let product = load(uow, id)?;
    policy::check(identity, Action::Delete, &Resource::Product { seller_id: product.seller_id })?;

    products::delete_product(uow.conn(), id)?;
    info!(actor_id = %actor.id, role = %actor.role, product_id = %id, "product deleted");
    Ok(product)
}

/// The calling seller's own listings.
pub fn list_seller_products(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<Vec<Product>> {
    let me = policy::authenticated(identity)?.id;
    policy::check(identity, Action::View, &Resource::SellerProducts { seller_id: me })?;
    products::list_by_seller(uow.conn(), me)
}

/// The whole catalog, for customers and admins.
pub fn list_all_products(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<Vec<Product>> {
    policy::check(identity, Action::View, &Resource::Products)?;
    products::list_products(uow.conn())
}

fn load(uow: &UnitOfWork<'_>, id: ProductId) -> BazaarResult<Product> {
    products::get_product(uow.conn(), id)?.ok_or(BazaarError::not_found("Product", id))
}
