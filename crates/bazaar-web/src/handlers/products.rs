//! Listing routes for sellers, plus the catalog for customers and admins.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use bazaar_core::identity::Identity;
use bazaar_core::models::{ProductDraft, ProductId, Role};
use bazaar_core::policy::{self, Action, Resource};
use bazaar_core::{BazaarError, Notice};
use bazaar_services::products;

use super::FormSpec;
use crate::error::{OrRedirect, WebError, WebResult};
use crate::extract::{form_body, Caller};
use crate::state::AppState;

const ADD_PAGE: &str = "/products/add";
const SELLER_PAGE: &str = "/products/seller";
const CATALOG_PAGE: &str = "/products/all";
const PRODUCT_FIELDS: &[&str] = &["name", "price", "stock"];

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .service(add_form)
            .service(add)
            .service(edit_form)
            .service(edit)
            .service(seller_products)
            .service(all_products)
            .service(view_product)
            .service(delete_product),
    );
}

/// Raw form input; numbers are validated by [`ProductDraft::parse`].
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl ProductForm {
    fn draft(&self) -> Result<ProductDraft, BazaarError> {
        ProductDraft::parse(&self.name, &self.price, &self.stock)
    }
}

fn edit_page(id: ProductId) -> String {
    format!("/products/edit/{id}")
}

/// Only sellers may open or submit the add form.
fn ensure_can_add(identity: &Identity) -> Result<(), BazaarError> {
    let me = policy::authenticated(identity)?.id;
    policy::check(identity, Action::Create, &Resource::Product { seller_id: me })?;
    Ok(())
}

#[get("/add")]
async fn add_form(caller: Caller) -> WebResult<HttpResponse> {
    ensure_can_add(&caller.identity)?;
    Ok(HttpResponse::Ok().json(FormSpec::post(ADD_PAGE, PRODUCT_FIELDS)))
}

#[post("/add")]
async fn add(
    state: web::Data<AppState>,
    caller: Caller,
    form: Result<web::Form<ProductForm>, actix_web::Error>,
) -> WebResult<HttpResponse> {
    ensure_can_add(&caller.identity)?;
    let draft = form_body(form)
        .and_then(|form| form.draft().map_err(WebError::from))
        .or_redirect(ADD_PAGE)?;

    let identity = caller.identity;
    let product = state
        .write(move |uow| products::create_product(uow, &identity, &draft))
        .await
        .or_redirect(ADD_PAGE)?;

    Ok(HttpResponse::Created().json(
        Notice::success("Product added successfully!")
            .redirect(SELLER_PAGE)
            .with_data(&product),
    ))
}

#[get("/edit/{id}")]
async fn edit_form(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let id = ProductId(path.into_inner());
    let product = state
        .read(move |uow| products::get_product_for_edit(uow, &identity, id))
        .await
        .or_redirect(SELLER_PAGE)?;

    Ok(HttpResponse::Ok().json(FormSpec::post(edit_page(id), PRODUCT_FIELDS).with_values(&product)))
}

#[post("/edit/{id}")]
async fn edit(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
    form: Result<web::Form<ProductForm>, actix_web::Error>,
) -> WebResult<HttpResponse> {
    let id = ProductId(path.into_inner());
    policy::check(&caller.identity, Action::Update, &Resource::Products)?;
    let draft = form_body(form)
        .and_then(|form| form.draft().map_err(WebError::from))
        .or_redirect(edit_page(id).as_str())?;

    let identity = caller.identity;
    let product = state
        .write(move |uow| products::update_product(uow, &identity, id, &draft))
        .await
        .or_redirect(SELLER_PAGE)?;

    Ok(HttpResponse::Ok().json(
        Notice::success("Product updated successfully!")
            .redirect(SELLER_PAGE)
            .with_data(&product),
    ))
}

#[get("/seller")]
async fn seller_products(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let listed = state
        .read(move |uow| products::list_seller_products(uow, &identity))
        .await?;
    Ok(HttpResponse::Ok().json(listed))
}

#[get("/all")]
async fn all_products(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let listed = state
        .read(move |uow| products::list_all_products(uow, &identity))
        .await?;
    Ok(HttpResponse::Ok().json(listed))
}

#[get("/view/{id}")]
async fn view_product(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let id = ProductId(path.into_inner());
    let product = state
        .read(move |uow| products::get_product(uow, &identity, id))
        .await
        .or_redirect(CATALOG_PAGE)?;
    Ok(HttpResponse::Ok().json(product))
}

#[get("/delete/{id}")]
async fn delete_product(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let back = match caller.identity.role() {
        Some(Role::Seller) => SELLER_PAGE,
        _ => CATALOG_PAGE,
    };
    let identity = caller.identity;
    let id = ProductId(path.into_inner());
    let removed = state
        .write(move |uow| products::delete_product(uow, &identity, id))
        .await
        .or_redirect(back)?;

    Ok(HttpResponse::Ok().json(
        Notice::success("Product deleted successfully!")
            .redirect(back)
            .with_data(&removed),
    ))
}
