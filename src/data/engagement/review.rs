use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct ReviewRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewRepository<'a> {
    /// Creates a new instance of [`ReviewRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        rating: i32,
        body: Option<String>,
    ) -> Result<entity::product_review::Model, DbErr> {
        let review = entity::product_review::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            product_id: ActiveValue::Set(product_id),
            user_id: ActiveValue::Set(user_id),
            rating: ActiveValue::Set(rating),
            body: ActiveValue::Set(body),
            published: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        review.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        review_id: Uuid,
    ) -> Result<Option<entity::product_review::Model>, DbErr> {
        entity::prelude::ProductReview::find_by_id(review_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_product_and_user(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<entity::product_review::Model>, DbErr> {
        entity::prelude::ProductReview::find()
            .filter(entity::product_review::Column::ProductId.eq(product_id))
            .filter(entity::product_review::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn list_published(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<entity::product_review::Model>, DbErr> {
        entity::prelude::ProductReview::find()
            .filter(entity::product_review::Column::ProductId.eq(product_id))
            .filter(entity::product_review::Column::Published.eq(true))
            .order_by_desc(entity::product_review::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn set_published(
        &self,
        review: entity::product_review::Model,
        published: bool,
    ) -> Result<entity::product_review::Model, DbErr> {
        let mut review: entity::product_review::ActiveModel = review.into();
        review.published = ActiveValue::Set(published);

        review.update(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;

    use crate::data::engagement::review::ReviewRepository;

    /// Expect unpublished reviews to be hidden from the public listing
    #[tokio::test]
    async fn list_hides_unpublished_reviews() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::ProductReview)?;
        let user = test.users().insert_user(1).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let review_repo = ReviewRepository::new(&test.state.db);
        let review = review_repo
            .create(product.id, user.id, 4, Some("Runs large".to_string()))
            .await?;

        assert_eq!(review_repo.list_published(product.id).await?.len(), 1);

        review_repo.set_published(review, false).await?;

        assert!(review_repo.list_published(product.id).await?.is_empty());

        Ok(())
    }

    /// Expect the per-user lookup to find an existing review
    #[tokio::test]
    async fn finds_review_by_product_and_user() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::ProductReview)?;
        let user = test.users().insert_user(1).await?;
        let other = test.users().insert_user(2).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let review_repo = ReviewRepository::new(&test.state.db);
        review_repo.create(product.id, user.id, 5, None).await?;

        let found = review_repo
            .find_by_product_and_user(product.id, user.id)
            .await?;
        assert!(found.is_some());

        let missing = review_repo
            .find_by_product_and_user(product.id, other.id)
            .await?;
        assert!(missing.is_none());

        Ok(())
    }
}
