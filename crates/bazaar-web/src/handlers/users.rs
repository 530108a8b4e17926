//! Account routes: registration, login, dashboards and user management.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use bazaar_core::config::SessionConfig;
use bazaar_core::errors::BazaarError;
use bazaar_core::models::UserId;
use bazaar_core::Notice;
use bazaar_services::{auth, dashboard, users};

use super::FormSpec;
use crate::error::{OrRedirect, WebResult, LOGIN_PAGE};
use crate::extract::{form_body, Caller};
use crate::state::AppState;

const REGISTER_PAGE: &str = "/users/register";
const MANAGE_USERS_PAGE: &str = "/users/manage_users";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(register_form)
            .service(register)
            .service(login_form)
            .service(login)
            .service(logout)
            .service(customer_dashboard)
            .service(seller_dashboard)
            .service(admin_dashboard)
            .service(manage_users)
            .service(view_user)
            .service(delete_user),
    );
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .finish()
}

fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(config, String::new());
    cookie.make_removal();
    cookie
}

#[get("/register")]
async fn register_form() -> HttpResponse {
    HttpResponse::Ok().json(FormSpec::post(REGISTER_PAGE, &["username", "email", "password"]))
}

#[post("/register")]
async fn register(
    state: web::Data<AppState>,
    form: Result<web::Form<RegisterForm>, actix_web::Error>,
) -> WebResult<HttpResponse> {
    let RegisterForm {
        username,
        email,
        password,
    } = form_body(form).or_redirect(REGISTER_PAGE)?;
    let user = state
        .write(move |uow| auth::register(uow, &username, &email, &password))
        .await
        .or_redirect(REGISTER_PAGE)?;

    Ok(HttpResponse::Created().json(
        Notice::success("Registration successful! You can login now.")
            .redirect(LOGIN_PAGE)
            .with_data(&user),
    ))
}

#[get("/login")]
async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(FormSpec::post(LOGIN_PAGE, &["email", "password"]))
}

#[post("/login")]
async fn login(
    state: web::Data<AppState>,
    form: Result<web::Form<LoginForm>, actix_web::Error>,
) -> WebResult<HttpResponse> {
    let LoginForm { email, password } = form_body(form).or_redirect(LOGIN_PAGE)?;
    let session = state
        .write(move |uow| auth::authenticate(uow, &email, &password))
        .await
        .or_redirect(LOGIN_PAGE)?;

    let notice = Notice::success("Logged in successfully!")
        .redirect(session.principal.role.dashboard_path())
        .with_data(&session.principal);
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state.session, session.token))
        .json(notice))
}

#[get("/logout")]
async fn logout(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let Some(token) = caller.token else {
        return Err(BazaarError::AuthenticationRequired.into());
    };
    state.write(move |uow| auth::logout(uow, &token)).await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(&state.session))
        .json(Notice::success("Logged out successfully!").redirect("/")))
}

#[get("/dashboard")]
async fn customer_dashboard(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let view = state
        .read(move |uow| dashboard::customer_dashboard(uow, &identity))
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/seller/dashboard")]
async fn seller_dashboard(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let view = state
        .read(move |uow| dashboard::seller_dashboard(uow, &identity))
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/admin/dashboard")]
async fn admin_dashboard(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let view = state
        .read(move |uow| dashboard::admin_dashboard(uow, &identity))
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/manage_users")]
async fn manage_users(state: web::Data<AppState>, caller: Caller) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let listed = state.read(move |uow| users::list_users(uow, &identity)).await?;
    Ok(HttpResponse::Ok().json(listed))
}

#[get("/view/{id}")]
async fn view_user(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let id = UserId(path.into_inner());
    let user = state
        .read(move |uow| users::get_user(uow, &identity, id))
        .await
        .or_redirect(MANAGE_USERS_PAGE)?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/delete_user/{id}")]
async fn delete_user(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> WebResult<HttpResponse> {
    let identity = caller.identity;
    let id = UserId(path.into_inner());
    let removed = state
        .write(move |uow| users::delete_user(uow, &identity, id))
        .await
        .or_redirect(MANAGE_USERS_PAGE)?;

    Ok(HttpResponse::Ok().json(
        Notice::success("User deleted successfully!")
            .redirect(MANAGE_USERS_PAGE)
            .with_data(&removed),
    ))
}
