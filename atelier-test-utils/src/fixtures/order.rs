use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::error::TestError;

/// Fixture helpers inserting orders and order items.
pub struct OrderFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderFixtures<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an order in the given status with the given total and no
    /// lines.
    pub async fn insert_order(
        &self,
        user_id: Uuid,
        status: &str,
        total: Decimal,
    ) -> Result<entity::customer_order::Model, TestError> {
        let now = Utc::now().naive_utc();

        let order = entity::customer_order::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(status.to_string()),
            subtotal: ActiveValue::Set(total),
            discount: ActiveValue::Set(Decimal::new(0, 2)),
            total: ActiveValue::Set(total),
            currency: ActiveValue::Set("USD".to_string()),
            promo_code_id: ActiveValue::Set(None),
            ship_to_name: ActiveValue::Set("A. Shopper".to_string()),
            ship_to_address: ActiveValue::Set("1 Main St".to_string()),
            placed_at: ActiveValue::Set(now),
            shipped_at: ActiveValue::Set(None),
            delivered_at: ActiveValue::Set(
                (status == "delivered").then_some(now),
            ),
            cancelled_at: ActiveValue::Set(None),
        };

        Ok(order.insert(self.db).await?)
    }

    /// Inserts a 29.00 USD order with one snapshotted line.
    pub async fn insert_order_with_item(
        &self,
        user_id: Uuid,
        status: &str,
    ) -> Result<(entity::customer_order::Model, entity::order_item::Model), TestError> {
        let order = self
            .insert_order(user_id, status, Decimal::new(2900, 2))
            .await?;

        let item = entity::order_item::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            order_id: ActiveValue::Set(order.id),
            variant_id: ActiveValue::Set(Uuid::new_v4()),
            sku: ActiveValue::Set("SKU-1".to_string()),
            name: ActiveValue::Set("Product 1".to_string()),
            size: ActiveValue::Set("M".to_string()),
            color: ActiveValue::Set("black".to_string()),
            unit_price: ActiveValue::Set(Decimal::new(2900, 2)),
            quantity: ActiveValue::Set(1),
        };
        let item = item.insert(self.db).await?;

        Ok((order, item))
    }

    /// Overwrites an order's status, stamping delivered_at when appropriate.
    pub async fn set_order_status(
        &self,
        order_id: Uuid,
        status: &str,
    ) -> Result<entity::customer_order::Model, TestError> {
        let order = entity::prelude::CustomerOrder::find_by_id(order_id)
            .one(self.db)
            .await?
            .expect("fixture order exists");

        let mut order: entity::customer_order::ActiveModel = order.into();
        order.status = ActiveValue::Set(status.to_string());

        if status == "delivered" {
            order.delivered_at = ActiveValue::Set(Some(Utc::now().naive_utc()));
        }

        Ok(order.update(self.db).await?)
    }
}
