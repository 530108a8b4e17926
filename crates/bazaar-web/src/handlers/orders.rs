//! Order routes. Customers place and review orders; admins moderate them.

use actix_web::{get, post, web, HttpResponse};

use bazaar_core::models::{OrderId, ProductId};
use bazaar_core::Notice;
use bazaar_services::orders;

use crate::error::{OrRedirect, WebResult};
use crate::extract::Caller;
use crate::state::AppState;

const MY_ORDERS_PAGE: &str = "/orders/my_orders";
const ALL_ORDERS_PAGE: &str = "/orders/all";
const CATALOG_PAGE: &str = "/products/all";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .service(place_order)
            .service(my_orders)
            .service(all_orders)
            .service(view_order)
            .service(delete_order),
    );
}

#[post("/place/{product_id}")]
async fn place_order(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let product_id = ProductId(path.into_inner());
    let order = state
        .write(move |uow| orders::place_order(uow, &identity, product_id))
        .await
        .or_redirect(CATALOG_PAGE)?;

    Ok(HttpResponse::Created().json(
        Notice::success("Order placed successfully!")
            .redirect(MY_ORDERS_PAGE)
            .with_data(&order),
    ))
}

#[get("/my_orders")]
async fn my_orders(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let lines = state
        .read(move |uow| orders::list_my_orders(uow, &identity))
        .await?;
    Ok(HttpResponse::Ok().json(lines))
}

#[get("/all")]
async fn all_orders(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let book = state
        .read(move |uow| orders::list_all_orders(uow, &identity))
        .await?;
    Ok(HttpResponse::Ok().json(book))
}

#[get("/view/{id}")]
async fn view_order(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let id = OrderId(path.into_inner());
    let record = state
        .read(move |uow| orders::get_order(uow, &identity, id))
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

#[get("/delete/{id}")]
async fn delete_order(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let id = OrderId(path.into_inner());
    let removed = state
        .write(move |uow| orders::delete_order(uow, &identity, id))
        .await
        .or_redirect(ALL_ORDERS_PAGE)?;

    Ok(HttpResponse::Ok().json(
        Notice::success("Order deleted successfully!")
            .redirect(ALL_ORDERS_PAGE)
            .with_data(&removed),
    ))
}
