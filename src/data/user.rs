use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::model::user::Role;

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user account
    pub async fn create(
        &self,
        email: String,
        password_hash: String,
        display_name: String,
        role: Role,
    ) -> Result<entity::shop_user::Model, DbErr> {
        let user = entity::shop_user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(email),
            password_hash: ActiveValue::Set(password_hash),
            display_name: ActiveValue::Set(display_name),
            role: ActiveValue::Set(role.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        user.insert(self.db).await
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<Option<entity::shop_user::Model>, DbErr> {
        entity::prelude::ShopUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::shop_user::Model>, DbErr> {
        entity::prelude::ShopUser::find()
            .filter(entity::shop_user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::ShopUser::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use uuid::Uuid;

    use crate::{data::user::UserRepository, model::user::Role};

    /// Expect success when creating a new user
    #[tokio::test]
    async fn creates_user() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_repository = UserRepository::new(&test.state.db);
        let result = user_repository
            .create(
                "shopper@example.com".to_string(),
                "not-a-real-hash".to_string(),
                "Shopper".to_string(),
                Role::Customer,
            )
            .await;

        assert!(result.is_ok());
        let user = result.unwrap();
        assert_eq!(user.email, "shopper@example.com");
        assert_eq!(user.role, "customer");

        Ok(())
    }

    /// Expect Error when creating a second user with the same email
    #[tokio::test]
    async fn rejects_duplicate_email() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_repository = UserRepository::new(&test.state.db);
        user_repository
            .create(
                "shopper@example.com".to_string(),
                "not-a-real-hash".to_string(),
                "Shopper".to_string(),
                Role::Customer,
            )
            .await?;

        let result = user_repository
            .create(
                "shopper@example.com".to_string(),
                "not-a-real-hash".to_string(),
                "Imposter".to_string(),
                Role::Customer,
            )
            .await;

        assert!(result.is_err());

        Ok(())
    }

    /// Expect lookup by email to find the created user
    #[tokio::test]
    async fn finds_user_by_email() -> Result<(), TestError> {
        let mut test = test_setup_with_tables!(entity::prelude::ShopUser)?;
        let user = test.users().insert_user(1).await?;

        let user_repository = UserRepository::new(&test.state.db);
        let found = user_repository.get_by_email(&user.email).await?;

        assert!(found.is_some());
        assert_eq!(found.unwrap().id, user.id);

        Ok(())
    }

    /// Expect no rows to be affected when deleting a user that does not exist
    #[tokio::test]
    async fn delete_unknown_user_affects_no_rows() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::ShopUser)?;

        let user_repository = UserRepository::new(&test.state.db);
        let result = user_repository.delete(Uuid::new_v4()).await?;

        assert_eq!(result.rows_affected, 0);

        Ok(())
    }
}
