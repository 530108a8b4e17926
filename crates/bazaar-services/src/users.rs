//! Admin user management.

use tracing::info;

use bazaar_core::errors::{BazaarError, BazaarResult};
use bazaar_core::identity::Identity;
use bazaar_core::models::{UserId, UserSummary};
use bazaar_core::policy::{self, Action, Resource};
use bazaar_storage::queries::users;
use bazaar_storage::UnitOfWork;

pub fn list_users(uow: &UnitOfWork<'_>, identity: &Identity) -> BazaarResult<Vec<UserSummary>> {
    policy::check(identity, Action::View, &Resource::Users)?;
    Ok(users::list_users(uow.conn())?
        .iter()
        .map(|u| u.summary())
        .collect())
}

pub fn get_user(uow: &UnitOfWork<'_>, identity: &Identity, id: UserId) -> BazaarResult<UserSummary> {
    policy::check(identity, Action::View, &Resource::Users)?;
    let user = users::get_user(uow.conn(), id)?.ok_or(BazaarError::not_found("User", id))?;
    policy::check(identity, Action::View, &Resource::User { role: user.role })?;
    Ok(user.summary())
}

/// Delete a non-admin account. Admin accounts, the caller's own included, are protected.
pub fn delete_user(uow: &UnitOfWork<'_>, identity: &Identity, id: UserId) -> BazaarResult<UserSummary> {
    let actor = policy::check(identity, Action::Delete, &Resource::Users)?;
    let conn = uow.conn();
    let user = users::get_user(conn, id)?.ok_or(BazaarError::not_found("User", id))?;
    policy::check(identity, Action::Delete, &Resource::User { role: user.role })?;

    users::delete_user(conn, id)?;
    info!(admin_id = %actor.id, user_id = %id, role = %user.role, "deleted user");
    Ok(user.summary())
}
