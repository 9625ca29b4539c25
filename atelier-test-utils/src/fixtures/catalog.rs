use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};
use uuid::Uuid;

use crate::error::TestError;

/// Fixture helpers inserting products and variants.
pub struct CatalogFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogFixtures<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts product `SKU-{n}` priced 29.00 USD with a single size-M black
    /// variant carrying the given stock.
    pub async fn insert_product_with_variant(
        &self,
        n: i64,
        stock_quantity: i32,
    ) -> Result<(entity::product::Model, entity::product_variant::Model), TestError> {
        let now = Utc::now().naive_utc();

        let product = entity::product::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            sku: ActiveValue::Set(format!("SKU-{}", n)),
            name: ActiveValue::Set(format!("Product {}", n)),
            description: ActiveValue::Set(None),
            category: ActiveValue::Set("tops".to_string()),
            price: ActiveValue::Set(Decimal::new(2900, 2)),
            currency: ActiveValue::Set("USD".to_string()),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        let product = product.insert(self.db).await?;

        let variant = entity::product_variant::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            product_id: ActiveValue::Set(product.id),
            size: ActiveValue::Set("M".to_string()),
            color: ActiveValue::Set("black".to_string()),
            stock_quantity: ActiveValue::Set(stock_quantity),
            created_at: ActiveValue::Set(now),
        };
        let variant = variant.insert(self.db).await?;

        Ok((product, variant))
    }
}
