use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::model::status::OrderStatus;

/// New order line passed to [`OrderRepository::create`]; carries the variant
/// snapshot taken at checkout.
pub struct NewOrderItem {
    pub variant_id: Uuid,
    pub sku: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Monetary breakdown of an order at creation.
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub currency: String,
}

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an order with its line items in the provided connection,
    /// typically a transaction shared with the stock decrement.
    pub async fn create(
        &self,
        user_id: Uuid,
        totals: OrderTotals,
        promo_code_id: Option<Uuid>,
        ship_to_name: String,
        ship_to_address: String,
        items: Vec<NewOrderItem>,
    ) -> Result<(entity::customer_order::Model, Vec<entity::order_item::Model>), DbErr> {
        let order = entity::customer_order::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(OrderStatus::Pending.as_str().to_string()),
            subtotal: ActiveValue::Set(totals.subtotal),
            discount: ActiveValue::Set(totals.discount),
            total: ActiveValue::Set(totals.total),
            currency: ActiveValue::Set(totals.currency),
            promo_code_id: ActiveValue::Set(promo_code_id),
            ship_to_name: ActiveValue::Set(ship_to_name),
            ship_to_address: ActiveValue::Set(ship_to_address),
            placed_at: ActiveValue::Set(Utc::now().naive_utc()),
            shipped_at: ActiveValue::Set(None),
            delivered_at: ActiveValue::Set(None),
            cancelled_at: ActiveValue::Set(None),
        };

        let order = order.insert(self.db).await?;

        let item_models = items.into_iter().map(|item| entity::order_item::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            order_id: ActiveValue::Set(order.id),
            variant_id: ActiveValue::Set(item.variant_id),
            sku: ActiveValue::Set(item.sku),
            name: ActiveValue::Set(item.name),
            size: ActiveValue::Set(item.size),
            color: ActiveValue::Set(item.color),
            unit_price: ActiveValue::Set(item.unit_price),
            quantity: ActiveValue::Set(item.quantity),
        });

        let items = entity::prelude::OrderItem::insert_many(item_models)
            .exec_with_returning(self.db)
            .await?;

        Ok((order, items))
    }

    pub async fn get_by_id(
        &self,
        order_id: Uuid,
    ) -> Result<Option<entity::customer_order::Model>, DbErr> {
        entity::prelude::CustomerOrder::find_by_id(order_id)
            .one(self.db)
            .await
    }

    pub async fn get_items(&self, order_id: Uuid) -> Result<Vec<entity::order_item::Model>, DbErr> {
        entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.eq(order_id))
            .all(self.db)
            .await
    }

    pub async fn get_item(
        &self,
        item_id: Uuid,
    ) -> Result<Option<entity::order_item::Model>, DbErr> {
        entity::prelude::OrderItem::find_by_id(item_id)
            .one(self.db)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<entity::customer_order::Model>, DbErr> {
        entity::prelude::CustomerOrder::find()
            .filter(entity::customer_order::Column::UserId.eq(user_id))
            .order_by_desc(entity::customer_order::Column::PlacedAt)
            .all(self.db)
            .await
    }

    pub async fn list_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<entity::customer_order::Model>, DbErr> {
        entity::prelude::CustomerOrder::find()
            .filter(entity::customer_order::Column::Status.eq(status.as_str()))
            .order_by_desc(entity::customer_order::Column::PlacedAt)
            .all(self.db)
            .await
    }

    /// Writes a new status, stamping the matching lifecycle timestamp.
    pub async fn update_status(
        &self,
        order: entity::customer_order::Model,
        status: OrderStatus,
    ) -> Result<entity::customer_order::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut order: entity::customer_order::ActiveModel = order.into();
        order.status = ActiveValue::Set(status.as_str().to_string());

        match status {
            OrderStatus::Shipped => order.shipped_at = ActiveValue::Set(Some(now)),
            OrderStatus::Delivered => order.delivered_at = ActiveValue::Set(Some(now)),
            OrderStatus::Cancelled => order.cancelled_at = ActiveValue::Set(Some(now)),
            _ => {}
        }

        order.update(self.db).await
    }

    /// Orders placed inside the half-open `[start, end)` window, for the
    /// daily sales rollup.
    pub async fn placed_in_window(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<entity::customer_order::Model>, DbErr> {
        entity::prelude::CustomerOrder::find()
            .filter(entity::customer_order::Column::PlacedAt.gte(start))
            .filter(entity::customer_order::Column::PlacedAt.lt(end))
            .all(self.db)
            .await
    }

    pub async fn get_items_for_orders(
        &self,
        order_ids: &[Uuid],
    ) -> Result<Vec<entity::order_item::Model>, DbErr> {
        entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.is_in(order_ids.iter().copied()))
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::{
        data::order::{NewOrderItem, OrderRepository, OrderTotals},
        model::status::OrderStatus,
    };

    fn line(variant_id: Uuid) -> NewOrderItem {
        NewOrderItem {
            variant_id,
            sku: "SKU-1".to_string(),
            name: "Product 1".to_string(),
            size: "M".to_string(),
            color: "black".to_string(),
            unit_price: Decimal::new(2900, 2),
            quantity: 2,
        }
    }

    /// Expect success when creating an order with one line
    #[tokio::test]
    async fn creates_order_with_items() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!()?;
        let user = test.users().insert_user(1).await?;
        let (_, variant) = test.catalog().insert_product_with_variant(1, 5).await?;

        let order_repo = OrderRepository::new(&test.state.db);
        let result = order_repo
            .create(
                user.id,
                OrderTotals {
                    subtotal: Decimal::new(5800, 2),
                    discount: Decimal::new(0, 2),
                    total: Decimal::new(5800, 2),
                    currency: "USD".to_string(),
                },
                None,
                "A. Shopper".to_string(),
                "1 Main St".to_string(),
                vec![line(variant.id)],
            )
            .await;

        assert!(result.is_ok(), "Error: {:?}", result);
        let (order, items) = result.unwrap();

        assert_eq!(order.status, "pending");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_id, order.id);
        assert_eq!(items[0].quantity, 2);

        Ok(())
    }

    /// Expect shipped status update to stamp shipped_at
    #[tokio::test]
    async fn update_status_stamps_timestamps() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "processing", Decimal::new(2900, 2))
            .await?;

        let order_repo = OrderRepository::new(&test.state.db);
        let order = order_repo
            .update_status(order, OrderStatus::Shipped)
            .await?;

        assert_eq!(order.status, "shipped");
        assert!(order.shipped_at.is_some());
        assert!(order.delivered_at.is_none());

        Ok(())
    }

    /// Expect user listing to exclude other users' orders
    #[tokio::test]
    async fn list_by_user_is_scoped() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!()?;
        let user = test.users().insert_user(1).await?;
        let other = test.users().insert_user(2).await?;
        test.orders()
            .insert_order(user.id, "pending", Decimal::new(2900, 2))
            .await?;
        test.orders()
            .insert_order(other.id, "pending", Decimal::new(2900, 2))
            .await?;

        let order_repo = OrderRepository::new(&test.state.db);
        let orders = order_repo.list_by_user(user.id).await?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].user_id, user.id);

        Ok(())
    }

    /// Expect None for an order ID that does not exist
    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown() -> Result<(), TestError> {
        let test = test_setup_with_order_tables!()?;

        let order_repo = OrderRepository::new(&test.state.db);
        let result = order_repo.get_by_id(Uuid::new_v4()).await?;

        assert!(result.is_none());

        Ok(())
    }
}
