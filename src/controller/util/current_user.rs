//! Session-user resolution and role checks.

use std::str::FromStr;

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{session::SessionUserId, user::Role},
};

/// Resolves the logged-in user from the session, clearing the session when
/// the referenced account no longer exists.
pub async fn require_user(
    session: &Session,
    db: &DatabaseConnection,
) -> Result<entity::shop_user::Model, Error> {
    let user_id = SessionUserId::get(session)
        .await?
        .ok_or(AuthError::UserNotInSession)?;

    let user_repo = UserRepository::new(db);

    match user_repo.get_by_id(user_id).await? {
        Some(user) => Ok(user),
        None => {
            // Clear session for user not found in database
            session.clear().await;

            tracing::warn!(
                "Failed to find user ID {} in database despite having an active session;
                cleared session for user, they will need to relog to fix",
                user_id
            );

            Err(AuthError::UserNotInDatabase(user_id).into())
        }
    }
}

/// Resolves the session user if logged in; anonymous callers get `None`.
pub async fn maybe_user(
    session: &Session,
    db: &DatabaseConnection,
) -> Result<Option<entity::shop_user::Model>, Error> {
    match require_user(session, db).await {
        Ok(user) => Ok(Some(user)),
        Err(Error::AuthError(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Whether the account has a staff role.
pub fn is_staff(user: &entity::shop_user::Model) -> Result<bool, Error> {
    Ok(Role::from_str(&user.role)?.is_staff())
}

/// Fails with 403 unless the account has a staff role.
pub fn require_staff(user: &entity::shop_user::Model) -> Result<(), Error> {
    if !is_staff(user)? {
        return Err(AuthError::Forbidden.into());
    }

    Ok(())
}
