//! Analytics service.
//!
//! Records storefront events and maintains the per-day sales rollup. The
//! rollup aggregates orders placed on a day (cancelled orders excluded) into
//! one `sales_daily` row; reruns overwrite.

use std::str::FromStr;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::{analytics::AnalyticsRepository, order::OrderRepository},
    error::Error,
    model::{
        analytics::{RecordEventDto, SalesDailyDto, TopProductDto},
        money::Money,
        status::OrderStatus,
    },
    util,
};

/// Service for analytics events and sales rollups.
pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    /// Creates a new instance of [`AnalyticsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a storefront event.
    pub async fn record_event(
        &self,
        user_id: Option<Uuid>,
        dto: RecordEventDto,
    ) -> Result<(), Error> {
        let kind = crate::model::analytics::EventKind::from_str(&dto.kind)?;

        let analytics_repo = AnalyticsRepository::new(self.db);
        analytics_repo
            .record(kind, user_id, dto.product_id, dto.order_id)
            .await?;

        Ok(())
    }

    /// Rebuilds the sales rollup row for `day` from the orders placed that
    /// day, excluding cancelled orders.
    pub async fn rollup_day(&self, day: NaiveDate) -> Result<SalesDailyDto, Error> {
        let (start, end) = util::time::day_bounds(day)?;

        let order_repo = OrderRepository::new(self.db);
        let analytics_repo = AnalyticsRepository::new(self.db);

        let orders: Vec<_> = order_repo
            .placed_in_window(start, end)
            .await?
            .into_iter()
            .filter(|order| order.status != OrderStatus::Cancelled.as_str())
            .collect();

        let order_ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
        let items = order_repo.get_items_for_orders(&order_ids).await?;

        let order_count = orders.len() as i64;
        let units_sold = items.iter().map(|item| i64::from(item.quantity)).sum();

        let mut revenue = Money::ZERO;
        for order in &orders {
            revenue = revenue.add(Money::new(order.total)?);
        }

        let row = analytics_repo
            .upsert_sales_daily(day, order_count, units_sold, revenue.amount())
            .await?;

        tracing::info!(
            day = %day,
            orders = order_count,
            units = units_sold,
            revenue = %row.revenue,
            "Sales rollup updated"
        );

        Ok(SalesDailyDto::from(row))
    }

    /// Returns the rollup rows covering an inclusive date range.
    pub async fn sales_summary(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SalesDailyDto>, Error> {
        let analytics_repo = AnalyticsRepository::new(self.db);

        let rows = analytics_repo.get_sales_range(from, to).await?;

        Ok(rows.into_iter().map(SalesDailyDto::from).collect())
    }

    /// Returns the best-selling products by units across all orders.
    pub async fn top_products(&self, limit: u64) -> Result<Vec<TopProductDto>, Error> {
        let analytics_repo = AnalyticsRepository::new(self.db);

        let rows = analytics_repo.top_products(limit).await?;

        Ok(rows
            .into_iter()
            .map(|(sku, name, units_sold)| TopProductDto {
                sku,
                name,
                units_sold,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::{
        error::Error,
        model::analytics::RecordEventDto,
        service::analytics::AnalyticsService,
    };

    /// Expect the rollup to count orders and exclude cancelled ones
    #[tokio::test]
    async fn rollup_excludes_cancelled_orders() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!(entity::prelude::SalesDaily)?;
        let user = test.users().insert_user(1).await?;
        test.orders()
            .insert_order_with_item(user.id, "paid")
            .await?;
        test.orders()
            .insert_order_with_item(user.id, "cancelled")
            .await?;

        let analytics_service = AnalyticsService::new(&test.state.db);
        let today = Utc::now().date_naive();
        let row = analytics_service.rollup_day(today).await?;

        assert_eq!(row.order_count, 1);
        assert_eq!(row.units_sold, 1);
        assert_eq!(row.revenue, Decimal::new(2900, 2));

        Ok(())
    }

    /// Expect a rerun of the same day to overwrite rather than double-count
    #[tokio::test]
    async fn rollup_rerun_overwrites() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!(entity::prelude::SalesDaily)?;
        let user = test.users().insert_user(1).await?;
        test.orders()
            .insert_order_with_item(user.id, "paid")
            .await?;

        let analytics_service = AnalyticsService::new(&test.state.db);
        let today = Utc::now().date_naive();
        analytics_service.rollup_day(today).await?;
        analytics_service.rollup_day(today).await?;

        let rows = analytics_service.sales_summary(today, today).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_count, 1);

        Ok(())
    }

    /// Expect unknown event kinds to be rejected
    #[tokio::test]
    async fn rejects_unknown_event_kind() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::AnalyticsEvent)?;

        let analytics_service = AnalyticsService::new(&test.state.db);
        let result = analytics_service
            .record_event(
                None,
                RecordEventDto {
                    kind: "bogus".to_string(),
                    product_id: None,
                    order_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(Error::ParseError(_))));

        Ok(())
    }

    /// Expect recorded events to accept optional references
    #[tokio::test]
    async fn records_event_with_references() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::AnalyticsEvent)?;

        let analytics_service = AnalyticsService::new(&test.state.db);
        let result = analytics_service
            .record_event(
                Some(Uuid::new_v4()),
                RecordEventDto {
                    kind: "product_view".to_string(),
                    product_id: Some(Uuid::new_v4()),
                    order_id: None,
                },
            )
            .await;

        assert!(result.is_ok());

        Ok(())
    }
}
