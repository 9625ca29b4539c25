use chrono::{NaiveDate, Utc};
use migration::{Alias, Expr, OnConflict};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::model::analytics::EventKind;

pub struct AnalyticsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsRepository<'a> {
    /// Creates a new instance of [`AnalyticsRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(
        &self,
        kind: EventKind,
        user_id: Option<Uuid>,
        product_id: Option<Uuid>,
        order_id: Option<Uuid>,
    ) -> Result<entity::analytics_event::Model, DbErr> {
        let event = entity::analytics_event::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            user_id: ActiveValue::Set(user_id),
            product_id: ActiveValue::Set(product_id),
            order_id: ActiveValue::Set(order_id),
            recorded_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        event.insert(self.db).await
    }

    /// Upserts the rollup row for `day`; reruns overwrite the previous
    /// aggregate for that day.
    pub async fn upsert_sales_daily(
        &self,
        day: NaiveDate,
        order_count: i64,
        units_sold: i64,
        revenue: Decimal,
    ) -> Result<entity::sales_daily::Model, DbErr> {
        let row = entity::sales_daily::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            day: ActiveValue::Set(day),
            order_count: ActiveValue::Set(order_count),
            units_sold: ActiveValue::Set(units_sold),
            revenue: ActiveValue::Set(revenue),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        entity::prelude::SalesDaily::insert(row)
            .on_conflict(
                OnConflict::column(entity::sales_daily::Column::Day)
                    .update_columns([
                        entity::sales_daily::Column::OrderCount,
                        entity::sales_daily::Column::UnitsSold,
                        entity::sales_daily::Column::Revenue,
                        entity::sales_daily::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_sales_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<entity::sales_daily::Model>, DbErr> {
        entity::prelude::SalesDaily::find()
            .filter(entity::sales_daily::Column::Day.gte(from))
            .filter(entity::sales_daily::Column::Day.lte(to))
            .order_by_asc(entity::sales_daily::Column::Day)
            .all(self.db)
            .await
    }

    /// Best-selling products by units across all order lines.
    pub async fn top_products(&self, limit: u64) -> Result<Vec<(String, String, i64)>, DbErr> {
        entity::prelude::OrderItem::find()
            .select_only()
            .column(entity::order_item::Column::Sku)
            .column(entity::order_item::Column::Name)
            .column_as(entity::order_item::Column::Quantity.sum(), "units_sold")
            .group_by(entity::order_item::Column::Sku)
            .group_by(entity::order_item::Column::Name)
            .order_by_desc(Expr::col(Alias::new("units_sold")))
            .limit(limit)
            .into_tuple::<(String, String, i64)>()
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::{data::analytics::AnalyticsRepository, model::analytics::EventKind};

    /// Expect recorded events to persist their kind string
    #[tokio::test]
    async fn records_event() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::AnalyticsEvent)?;

        let analytics_repo = AnalyticsRepository::new(&test.state.db);
        let event = analytics_repo
            .record(EventKind::AddToCart, None, None, None)
            .await?;

        assert_eq!(event.kind, "add_to_cart");

        Ok(())
    }

    /// Expect a rerun of the rollup to overwrite the day's row
    #[tokio::test]
    async fn sales_daily_upsert_overwrites() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::SalesDaily)?;
        let day = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        let analytics_repo = AnalyticsRepository::new(&test.state.db);
        analytics_repo
            .upsert_sales_daily(day, 2, 5, Decimal::new(14500, 2))
            .await?;
        let updated = analytics_repo
            .upsert_sales_daily(day, 3, 8, Decimal::new(20100, 2))
            .await?;

        assert_eq!(updated.order_count, 3);

        let rows = analytics_repo.get_sales_range(day, day).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].units_sold, 8);

        Ok(())
    }

    /// Expect top products ranked by total units sold
    #[tokio::test]
    async fn ranks_top_products_by_units() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!()?;
        let user = test.users().insert_user(1).await?;
        test.orders()
            .insert_order_with_item(user.id, "delivered")
            .await?;
        let (_, item) = test
            .orders()
            .insert_order_with_item(user.id, "delivered")
            .await?;

        let analytics_repo = AnalyticsRepository::new(&test.state.db);
        let top = analytics_repo.top_products(5).await?;

        assert!(!top.is_empty());
        let (sku, _, units) = &top[0];
        assert_eq!(sku, &item.sku);
        assert_eq!(*units, 2);

        Ok(())
    }
}
