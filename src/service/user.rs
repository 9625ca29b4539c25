//! User account service.
//!
//! This module contains business logic for user registration, credential
//! verification, and account lookup. Passwords are hashed with Argon2id;
//! login failures for unknown emails and wrong passwords are reported
//! identically so the API does not leak which emails exist.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::user::{RegisterDto, Role, UserDto},
    service::retry::RetryContext,
};

/// Service for managing user account operations.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a customer account, hashing the password with Argon2id.
    pub async fn register(&self, dto: RegisterDto) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.get_by_email(&dto.email).await?.is_some() {
            return Err(AuthError::EmailTaken(dto.email).into());
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(dto.password.as_bytes(), &salt)
            .map_err(|e| Error::InternalError(format!("Failed to hash password: {}", e)))?
            .to_string();

        let user = user_repo
            .create(dto.email, password_hash, dto.display_name, Role::Customer)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(UserDto::from(user))
    }

    /// Verifies login credentials, returning the account on success.
    ///
    /// Unknown email and wrong password both produce
    /// [`AuthError::InvalidCredentials`].
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<entity::shop_user::Model, Error> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .get_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AuthError::MalformedPasswordHash)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(user)
    }

    /// Retrieves user information by ID.
    ///
    /// Uses automatic retry logic to handle transient database failures.
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<UserDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get user ID {}", user_id), |_| {
            let db = db.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);

                Ok(user_repo.get_by_id(user_id).await?.map(UserDto::from))
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use uuid::Uuid;

    use crate::{
        error::{auth::AuthError, Error},
        model::user::RegisterDto,
        service::user::UserService,
    };

    fn register_dto(email: &str) -> RegisterDto {
        RegisterDto {
            email: email.to_string(),
            password: "correct horse battery staple".to_string(),
            display_name: "Shopper".to_string(),
        }
    }

    /// Expect a registered user to log in with the same password
    #[tokio::test]
    async fn register_then_login_round_trips() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_service = UserService::new(&test.state.db);
        let registered = user_service
            .register(register_dto("shopper@example.com"))
            .await?;

        let user = user_service
            .verify_credentials("shopper@example.com", "correct horse battery staple")
            .await?;

        assert_eq!(user.id, registered.id);

        Ok(())
    }

    /// Expect a wrong password to fail with InvalidCredentials
    #[tokio::test]
    async fn wrong_password_fails() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_service = UserService::new(&test.state.db);
        user_service
            .register(register_dto("shopper@example.com"))
            .await?;

        let result = user_service
            .verify_credentials("shopper@example.com", "wrong password")
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }

    /// Expect an unknown email to fail identically to a wrong password
    #[tokio::test]
    async fn unknown_email_fails_identically() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_service = UserService::new(&test.state.db);
        let result = user_service
            .verify_credentials("nobody@example.com", "whatever")
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }

    /// Expect a duplicate email registration to be rejected
    #[tokio::test]
    async fn rejects_duplicate_email() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_service = UserService::new(&test.state.db);
        user_service
            .register(register_dto("shopper@example.com"))
            .await?;

        let result = user_service
            .register(register_dto("shopper@example.com"))
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::EmailTaken(_)))
        ));

        Ok(())
    }

    /// Expect Ok with None for a user ID that does not exist
    #[tokio::test]
    async fn get_user_returns_none_for_unknown() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_service = UserService::new(&test.state.db);
        let result = user_service.get_user(Uuid::new_v4()).await;

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());

        Ok(())
    }
}
