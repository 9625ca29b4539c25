use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct CartRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CartRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns the user's open cart, creating one if none exists.
    pub async fn get_or_create_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<entity::cart::Model, DbErr> {
        let existing = entity::prelude::Cart::find()
            .filter(entity::cart::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        if let Some(cart) = existing {
            return Ok(cart);
        }

        let now = Utc::now().naive_utc();

        let cart = entity::cart::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        cart.insert(self.db).await
    }

    pub async fn get_items(&self, cart_id: Uuid) -> Result<Vec<entity::cart_item::Model>, DbErr> {
        entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::CartId.eq(cart_id))
            .order_by_asc(entity::cart_item::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn get_item(
        &self,
        item_id: Uuid,
    ) -> Result<Option<entity::cart_item::Model>, DbErr> {
        entity::prelude::CartItem::find_by_id(item_id)
            .one(self.db)
            .await
    }

    pub async fn find_item_by_variant(
        &self,
        cart_id: Uuid,
        variant_id: Uuid,
    ) -> Result<Option<entity::cart_item::Model>, DbErr> {
        entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::CartId.eq(cart_id))
            .filter(entity::cart_item::Column::VariantId.eq(variant_id))
            .one(self.db)
            .await
    }

    /// Inserts a new line with the snapshotted unit price.
    pub async fn insert_item(
        &self,
        cart_id: Uuid,
        variant_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<entity::cart_item::Model, DbErr> {
        let item = entity::cart_item::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            cart_id: ActiveValue::Set(cart_id),
            variant_id: ActiveValue::Set(variant_id),
            quantity: ActiveValue::Set(quantity),
            unit_price: ActiveValue::Set(unit_price),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        item.insert(self.db).await
    }

    pub async fn update_item_quantity(
        &self,
        item: entity::cart_item::Model,
        quantity: i32,
    ) -> Result<entity::cart_item::Model, DbErr> {
        let mut item: entity::cart_item::ActiveModel = item.into();
        item.quantity = ActiveValue::Set(quantity);

        item.update(self.db).await
    }

    pub async fn delete_item(&self, item_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::CartItem::delete_by_id(item_id)
            .exec(self.db)
            .await
    }

    /// Removes every line from the cart.
    pub async fn clear(&self, cart_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::CartItem::delete_many()
            .filter(entity::cart_item::Column::CartId.eq(cart_id))
            .exec(self.db)
            .await
    }

    /// Bumps the cart's updated_at so the stale-cart sweep spares it.
    pub async fn touch(&self, cart: entity::cart::Model) -> Result<entity::cart::Model, DbErr> {
        let mut cart: entity::cart::ActiveModel = cart.into();
        cart.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        cart.update(self.db).await
    }

    /// Deletes carts untouched since `cutoff`, items first to satisfy the
    /// foreign key. Returns the number of carts removed.
    pub async fn delete_stale(&self, cutoff: NaiveDateTime) -> Result<u64, DbErr> {
        let stale: Vec<Uuid> = entity::prelude::Cart::find()
            .filter(entity::cart::Column::UpdatedAt.lt(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(|cart| cart.id)
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        entity::prelude::CartItem::delete_many()
            .filter(entity::cart_item::Column::CartId.is_in(stale.iter().copied()))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Cart::delete_many()
            .filter(entity::cart::Column::Id.is_in(stale))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, ActiveValue};
    use uuid::Uuid;

    use crate::data::cart::CartRepository;

    /// Expect the same cart to be returned on repeated calls for one user
    #[tokio::test]
    async fn get_or_create_is_idempotent() -> Result<(), TestError> {
        let mut test = test_setup_with_user_tables!()?;
        let user = test.users().insert_user(1).await?;

        let cart_repo = CartRepository::new(&test.state.db);
        let first = cart_repo.get_or_create_by_user(user.id).await?;
        let second = cart_repo.get_or_create_by_user(user.id).await?;

        assert_eq!(first.id, second.id);

        Ok(())
    }

    /// Expect inserted lines to come back in insertion order
    #[tokio::test]
    async fn returns_cart_items() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!()?;
        let user = test.users().insert_user(1).await?;
        let (_, variant_a) = test.catalog().insert_product_with_variant(1, 5).await?;
        let (_, variant_b) = test.catalog().insert_product_with_variant(2, 5).await?;

        let cart_repo = CartRepository::new(&test.state.db);
        let cart = cart_repo.get_or_create_by_user(user.id).await?;
        cart_repo
            .insert_item(cart.id, variant_a.id, 1, Decimal::new(2900, 2))
            .await?;
        cart_repo
            .insert_item(cart.id, variant_b.id, 2, Decimal::new(1500, 2))
            .await?;

        let items = cart_repo.get_items(cart.id).await?;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].variant_id, variant_a.id);
        assert_eq!(items[1].variant_id, variant_b.id);

        Ok(())
    }

    /// Expect clear to remove every line from the cart
    #[tokio::test]
    async fn clear_empties_cart() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!()?;
        let user = test.users().insert_user(1).await?;
        let (_, variant) = test.catalog().insert_product_with_variant(1, 5).await?;

        let cart_repo = CartRepository::new(&test.state.db);
        let cart = cart_repo.get_or_create_by_user(user.id).await?;
        cart_repo
            .insert_item(cart.id, variant.id, 1, Decimal::new(2900, 2))
            .await?;

        let result = cart_repo.clear(cart.id).await?;
        assert_eq!(result.rows_affected, 1);

        let items = cart_repo.get_items(cart.id).await?;
        assert!(items.is_empty());

        Ok(())
    }

    /// Expect the stale sweep to remove old carts but spare fresh ones
    #[tokio::test]
    async fn delete_stale_spares_fresh_carts() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!()?;
        let stale_user = test.users().insert_user(1).await?;
        let fresh_user = test.users().insert_user(2).await?;

        let cart_repo = CartRepository::new(&test.state.db);
        let stale_cart = cart_repo.get_or_create_by_user(stale_user.id).await?;
        let fresh_cart = cart_repo.get_or_create_by_user(fresh_user.id).await?;

        // Age the first cart past the cutoff
        let mut aged: entity::cart::ActiveModel = stale_cart.into();
        aged.updated_at =
            ActiveValue::Set(Utc::now().naive_utc() - Duration::days(60));
        aged.update(&test.state.db).await?;

        let cutoff = Utc::now().naive_utc() - Duration::days(30);
        let removed = cart_repo.delete_stale(cutoff).await?;

        assert_eq!(removed, 1);
        let remaining = cart_repo.get_or_create_by_user(fresh_user.id).await?;
        assert_eq!(remaining.id, fresh_cart.id);

        Ok(())
    }

    /// Expect None for a cart item that does not exist
    #[tokio::test]
    async fn get_item_returns_none_for_unknown() -> Result<(), TestError> {
        let test = test_setup_with_cart_tables!()?;

        let cart_repo = CartRepository::new(&test.state.db);
        let result = cart_repo.get_item(Uuid::new_v4()).await?;

        assert!(result.is_none());

        Ok(())
    }
}
