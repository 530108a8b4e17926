//! Session/auth gate: registration, login, identity resolution, logout.

use tracing::{debug, info, warn};
use uuid::Uuid;

use bazaar_core::errors::{BazaarError, BazaarResult};
use bazaar_core::identity::{Identity, Principal};
use bazaar_core::models::{NewUser, Role, User, UserSummary};
use bazaar_storage::queries::{sessions, users};
use bazaar_storage::UnitOfWork;

use crate::password;

/// Sessions older than this stop resolving and are pruned on the next login.
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// An established login: the opaque token handed to the client and who it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub principal: Principal,
}

pub(crate) fn principal_of(user: &User) -> Principal {
    Principal {
        id: user.id,
        username: user.username.clone(),
        role: user.role,
    }
}

/// Create a customer account. The registrant never chooses a role.
pub fn register(
    uow: &UnitOfWork<'_>,
    username: &str,
    email: &str,
    password: &str,
) -> BazaarResult<UserSummary> {
    let user = create_account(uow, username, email, password, Role::Customer)?;
    info!(user_id = %user.id, username = %user.username, "registered customer account");
    Ok(user.summary())
}

/// Shared by registration and operator provisioning.
pub(crate) fn create_account(
    uow: &UnitOfWork<'_>,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> BazaarResult<User> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() {
        return Err(BazaarError::Validation("username is required".to_string()));
    }
    if !email.contains('@') {
        return Err(BazaarError::Validation("a valid email is required".to_string()));
    }
    if password.is_empty() {
        return Err(BazaarError::Validation("password is required".to_string()));
    }

    let conn = uow.conn();
    if users::find_by_username(conn, username)?.is_some() {
        return Err(BazaarError::DuplicateKey { field: "username" });
    }
    if users::find_by_email(conn, email)?.is_some() {
        return Err(BazaarError::DuplicateKey { field: "email" });
    }

    let new_user = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password::hash_password(password)?,
        role,
    };
    users::insert_user(conn, &new_user)
}

/// Check a credential pair and open a session bound to the account.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub fn authenticate(uow: &UnitOfWork<'_>, email: &str, password: &str) -> BazaarResult<Session> {
    let conn = uow.conn();
    let user = match users::find_by_email(conn, email.trim())? {
        Some(user) if password::verify_password(password, &user.password_hash) => user,
        found => {
            if found.is_none() {
                // Same Argon2 cost as a wrong password.
                password::verify_dummy(password);
            }
            warn!(email = %email.trim(), "login failed");
            return Err(BazaarError::InvalidCredentials);
        }
    };

    let pruned = sessions::prune_sessions(conn, SESSION_MAX_AGE_SECS)?;
    if pruned > 0 {
        debug!(pruned, "expired sessions removed");
    }
    let token = Uuid::new_v4().simple().to_string();
    sessions::create_session(conn, &token, user.id)?;
    info!(user_id = %user.id, role = %user.role, "logged in");

    Ok(Session {
        token,
        principal: principal_of(&user),
    })
}

/// Resolve the acting identity for a request. A missing, unknown or expired
/// token, or one whose account was deleted, resolves to `Anonymous`.
pub fn current_identity(uow: &UnitOfWork<'_>, token: Option<&str>) -> BazaarResult<Identity> {
    let Some(token) = token else {
        return Ok(Identity::Anonymous);
    };
    Ok(sessions::resolve_session(uow.conn(), token, SESSION_MAX_AGE_SECS)?
        .map(|user| Identity::User(principal_of(&user)))
        .unwrap_or_default())
}

/// Invalidate the session. Returns `false` if it was already gone.
pub fn logout(uow: &UnitOfWork<'_>, token: &str) -> BazaarResult<bool> {
    let removed = sessions::delete_session(uow.conn(), token)?;
    if removed {
        info!("logged out");
    }
    Ok(removed)
}
