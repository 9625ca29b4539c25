use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct WishlistRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WishlistRepository<'a> {
    /// Creates a new instance of [`WishlistRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a product to the wishlist; adding an already-present product
    /// returns the existing row.
    pub async fn add(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<entity::wishlist_item::Model, DbErr> {
        let existing = entity::prelude::WishlistItem::find()
            .filter(entity::wishlist_item::Column::UserId.eq(user_id))
            .filter(entity::wishlist_item::Column::ProductId.eq(product_id))
            .one(self.db)
            .await?;

        if let Some(item) = existing {
            return Ok(item);
        }

        let item = entity::wishlist_item::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            product_id: ActiveValue::Set(product_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        item.insert(self.db).await
    }

    pub async fn remove(&self, user_id: Uuid, product_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::WishlistItem::delete_many()
            .filter(entity::wishlist_item::Column::UserId.eq(user_id))
            .filter(entity::wishlist_item::Column::ProductId.eq(product_id))
            .exec(self.db)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<entity::wishlist_item::Model>, DbErr> {
        entity::prelude::WishlistItem::find()
            .filter(entity::wishlist_item::Column::UserId.eq(user_id))
            .order_by_desc(entity::wishlist_item::Column::CreatedAt)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;

    use crate::data::engagement::wishlist::WishlistRepository;

    /// Expect adding the same product twice to keep a single row
    #[tokio::test]
    async fn add_is_idempotent() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::WishlistItem)?;
        let user = test.users().insert_user(1).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let wishlist_repo = WishlistRepository::new(&test.state.db);
        let first = wishlist_repo.add(user.id, product.id).await?;
        let second = wishlist_repo.add(user.id, product.id).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(wishlist_repo.list_by_user(user.id).await?.len(), 1);

        Ok(())
    }

    /// Expect remove to delete the row and report it
    #[tokio::test]
    async fn remove_deletes_row() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::WishlistItem)?;
        let user = test.users().insert_user(1).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let wishlist_repo = WishlistRepository::new(&test.state.db);
        wishlist_repo.add(user.id, product.id).await?;

        let result = wishlist_repo.remove(user.id, product.id).await?;
        assert_eq!(result.rows_affected, 1);

        assert!(wishlist_repo.list_by_user(user.id).await?.is_empty());

        Ok(())
    }
}
