//! Maintenance task implementations run by the cron scheduler.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{cart::CartRepository, payment::PaymentRepository},
    error::Error,
    model::analytics::SalesDailyDto,
    scheduler::config::STALE_CART_DAYS,
    service::analytics::AnalyticsService,
};

/// Flips scheduled installments past their due date to overdue; returns the
/// number flipped.
pub async fn sweep_overdue_installments(db: &DatabaseConnection) -> Result<u64, Error> {
    let payment_repo = PaymentRepository::new(db);

    let flipped = payment_repo.mark_overdue(Utc::now().naive_utc()).await?;

    Ok(flipped)
}

/// Deletes open carts untouched for [`STALE_CART_DAYS`]; returns the number
/// removed.
pub async fn cleanup_stale_carts(db: &DatabaseConnection) -> Result<u64, Error> {
    let cart_repo = CartRepository::new(db);

    let cutoff = Utc::now().naive_utc() - Duration::days(STALE_CART_DAYS);
    let removed = cart_repo.delete_stale(cutoff).await?;

    Ok(removed)
}

/// Rebuilds the sales rollup for yesterday (UTC).
pub async fn rollup_previous_day(db: &DatabaseConnection) -> Result<SalesDailyDto, Error> {
    let yesterday = Utc::now()
        .date_naive()
        .pred_opt()
        .ok_or_else(|| Error::ParseError("Failed to calculate previous day".to_string()))?;

    let analytics_service = AnalyticsService::new(db);

    analytics_service.rollup_day(yesterday).await
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, ActiveValue};

    use crate::{
        data::{cart::CartRepository, payment::PaymentRepository},
        scheduler::maintenance::{cleanup_stale_carts, sweep_overdue_installments},
    };

    /// Expect the sweep to flip only past-due scheduled installments
    #[tokio::test]
    async fn sweeps_past_due_installments() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(9000, 2))
            .await?;

        let payment_repo = PaymentRepository::new(&test.state.db);
        let plan = payment_repo.create_plan(order.id, 2).await?;

        let now = Utc::now().naive_utc();
        payment_repo
            .create_installments(
                plan.id,
                vec![
                    (Decimal::new(4500, 2), now - Duration::days(1)),
                    (Decimal::new(4500, 2), now + Duration::days(29)),
                ],
            )
            .await?;

        let flipped = sweep_overdue_installments(&test.state.db).await.unwrap();

        assert_eq!(flipped, 1);

        Ok(())
    }

    /// Expect only carts past the staleness cutoff to be deleted
    #[tokio::test]
    async fn cleans_only_stale_carts() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!()?;
        let stale_user = test.users().insert_user(1).await?;
        let fresh_user = test.users().insert_user(2).await?;

        let cart_repo = CartRepository::new(&test.state.db);
        let stale_cart = cart_repo.get_or_create_by_user(stale_user.id).await?;
        cart_repo.get_or_create_by_user(fresh_user.id).await?;

        let mut aged: entity::cart::ActiveModel = stale_cart.into();
        aged.updated_at = ActiveValue::Set(Utc::now().naive_utc() - Duration::days(45));
        aged.update(&test.state.db).await?;

        let removed = cleanup_stale_carts(&test.state.db).await.unwrap();

        assert_eq!(removed, 1);

        Ok(())
    }
}
