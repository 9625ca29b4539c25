use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};
use uuid::Uuid;

use crate::{constant::TEST_PASSWORD, error::TestError};

/// Fixture helpers inserting user accounts.
pub struct UserFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserFixtures<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a customer account `user{n}@example.com` whose password is
    /// [`TEST_PASSWORD`].
    pub async fn insert_user(&self, n: i64) -> Result<entity::shop_user::Model, TestError> {
        self.insert_with_role(n, "customer").await
    }

    /// Inserts an agent account `user{n}@example.com`.
    pub async fn insert_staff(&self, n: i64) -> Result<entity::shop_user::Model, TestError> {
        self.insert_with_role(n, "agent").await
    }

    async fn insert_with_role(
        &self,
        n: i64,
        role: &str,
    ) -> Result<entity::shop_user::Model, TestError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(TEST_PASSWORD.as_bytes(), &salt)
            .map_err(|e| TestError::PasswordHash(e.to_string()))?
            .to_string();

        let user = entity::shop_user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(format!("user{}@example.com", n)),
            password_hash: ActiveValue::Set(password_hash),
            display_name: ActiveValue::Set(format!("User {}", n)),
            role: ActiveValue::Set(role.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        Ok(user.insert(self.db).await?)
    }
}
