//! Operator-side account creation, used to bootstrap sellers and admins
//! since self-registration only ever yields customers.

use tracing::info;

use bazaar_core::errors::BazaarResult;
use bazaar_core::models::{Role, UserSummary};
use bazaar_storage::queries::users;
use bazaar_storage::UnitOfWork;

use crate::auth;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    Created(UserSummary),
    /// An account with this username was already present and left untouched.
    Existing(UserSummary),
}

/// Create the account unless the username is already taken. Safe to re-run.
pub fn ensure_account(
    uow: &UnitOfWork<'_>,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> BazaarResult<Provisioned> {
    if let Some(existing) = users::find_by_username(uow.conn(), username.trim())? {
        if existing.role != role {
            tracing::warn!(
                username = %existing.username,
                existing_role = %existing.role,
                requested_role = %role,
                "account exists with a different role; leaving it unchanged"
            );
        }
        return Ok(Provisioned::Existing(existing.summary()));
    }

    let user = auth::create_account(uow, username, email, password, role)?;
    info!(user_id = %user.id, username = %user.username, %role, "provisioned account");
    Ok(Provisioned::Created(user.summary()))
}
