use actix_web::{get, web, HttpResponse};

use bazaar_core::Notice;

use crate::extract::Caller;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}

#[get("/")]
async fn index(caller: Caller) -> HttpResponse {
    let notice = Notice::success("Welcome to the Bazaar!");
    let notice = match caller.identity.principal() {
        Some(me) => notice.redirect(me.role.dashboard_path()).with_data(me),
        None => notice,
    };
    HttpResponse::Ok().json(notice)
}
