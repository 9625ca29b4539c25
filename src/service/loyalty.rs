//! Loyalty account service.
//!
//! Points accrue when payments capture (one point per whole currency unit)
//! and can be redeemed against a pending order at 100 points per currency
//! unit. Every movement lands in the ledger.

use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    data::{loyalty::LoyaltyRepository, order::OrderRepository},
    error::{order::OrderError, payment::PaymentError, Error},
    model::{
        loyalty::{LoyaltyAccountDto, LoyaltyTransactionDto},
        money::Money,
        status::OrderStatus,
    },
};

/// Points worth one currency unit when redeeming.
const POINTS_PER_CURRENCY_UNIT_REDEEMED: i64 = 100;

/// Service for loyalty balances and redemptions.
pub struct LoyaltyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LoyaltyService<'a> {
    /// Creates a new instance of [`LoyaltyService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the user's account, creating an empty one on first use.
    pub async fn get_account(&self, user_id: Uuid) -> Result<LoyaltyAccountDto, Error> {
        let loyalty_repo = LoyaltyRepository::new(self.db);

        let account = loyalty_repo.get_or_create_account(user_id).await?;

        Ok(LoyaltyAccountDto::from(account))
    }

    /// Returns the user's ledger, newest first.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<LoyaltyTransactionDto>, Error> {
        let loyalty_repo = LoyaltyRepository::new(self.db);

        let account = loyalty_repo.get_or_create_account(user_id).await?;
        let transactions = loyalty_repo.get_transactions(account.id).await?;

        Ok(transactions
            .into_iter()
            .map(LoyaltyTransactionDto::from)
            .collect())
    }

    /// Redeems points against a pending order, reducing its total. 100
    /// points are worth one currency unit; the credit is capped at the
    /// order total.
    pub async fn redeem_points(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        points: i64,
    ) -> Result<LoyaltyAccountDto, Error> {
        if points <= 0 {
            return Err(PaymentError::InvalidPointAmount(points).into());
        }

        let loyalty_repo = LoyaltyRepository::new(self.db);
        let order_repo = OrderRepository::new(self.db);

        let account = loyalty_repo.get_or_create_account(user_id).await?;

        if points > account.points_balance {
            return Err(PaymentError::InsufficientPoints {
                requested: points,
                available: account.points_balance,
            }
            .into());
        }

        let order = order_repo
            .get_by_id(order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let status = OrderStatus::from_str(&order.status)?;
        if !matches!(status, OrderStatus::Pending) {
            return Err(PaymentError::OrderNotPayable(status).into());
        }

        let total = Money::new(order.total)?;
        let credit = Money::new(
            Decimal::from(points) / Decimal::from(POINTS_PER_CURRENCY_UNIT_REDEEMED),
        )?;
        let credit = if credit.amount() > total.amount() {
            total
        } else {
            credit
        };
        let new_total = total.sub(credit)?;
        let new_discount = Money::new(order.discount)?.add(credit);

        let txn = self.db.begin().await?;

        let mut active: entity::customer_order::ActiveModel = order.into();
        active.discount = ActiveValue::Set(new_discount.amount());
        active.total = ActiveValue::Set(new_total.amount());
        let order = active.update(&txn).await?;

        let txn_loyalty_repo = LoyaltyRepository::new(&txn);
        let account = txn_loyalty_repo
            .get_or_create_account(user_id)
            .await?;
        let (account, _) = txn_loyalty_repo
            .apply_delta(
                account,
                -points,
                "Points redeemed against order".to_string(),
                Some(order.id),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            order_id = %order_id,
            points,
            credit = %credit,
            "Loyalty points redeemed"
        );

        Ok(LoyaltyAccountDto::from(account))
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use rust_decimal::Decimal;

    use crate::{
        data::{loyalty::LoyaltyRepository, order::OrderRepository},
        error::{payment::PaymentError, Error},
        service::loyalty::LoyaltyService,
    };

    /// Expect redemption to reduce the order total and the balance together
    #[tokio::test]
    async fn redeems_points_against_pending_order() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(5000, 2))
            .await?;

        let loyalty_repo = LoyaltyRepository::new(&test.state.db);
        let account = loyalty_repo.get_or_create_account(user.id).await?;
        loyalty_repo
            .apply_delta(account, 1000, "seed".to_string(), None)
            .await?;

        let loyalty_service = LoyaltyService::new(&test.state.db);
        let account = loyalty_service
            .redeem_points(user.id, order.id, 500)
            .await?;

        // 500 points = 5.00 off
        assert_eq!(account.points_balance, 500);

        let order_repo = OrderRepository::new(&test.state.db);
        let order = order_repo.get_by_id(order.id).await?.unwrap();
        assert_eq!(order.total, Decimal::new(4500, 2));
        assert_eq!(order.discount, Decimal::new(500, 2));

        Ok(())
    }

    /// Expect InsufficientPoints when redeeming more than the balance
    #[tokio::test]
    async fn rejects_redeeming_above_balance() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(5000, 2))
            .await?;

        let loyalty_service = LoyaltyService::new(&test.state.db);
        let result = loyalty_service.redeem_points(user.id, order.id, 500).await;

        assert!(matches!(
            result,
            Err(Error::PaymentError(PaymentError::InsufficientPoints { .. }))
        ));

        Ok(())
    }

    /// Expect a non-positive point amount to be rejected
    #[tokio::test]
    async fn rejects_non_positive_points() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(5000, 2))
            .await?;

        let loyalty_service = LoyaltyService::new(&test.state.db);
        let result = loyalty_service.redeem_points(user.id, order.id, 0).await;

        assert!(matches!(
            result,
            Err(Error::PaymentError(PaymentError::InvalidPointAmount(_)))
        ));

        Ok(())
    }

    /// Expect redemption against a paid order to be rejected
    #[tokio::test]
    async fn rejects_redeeming_against_paid_order() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "paid", Decimal::new(5000, 2))
            .await?;

        let loyalty_repo = LoyaltyRepository::new(&test.state.db);
        let account = loyalty_repo.get_or_create_account(user.id).await?;
        loyalty_repo
            .apply_delta(account, 1000, "seed".to_string(), None)
            .await?;

        let loyalty_service = LoyaltyService::new(&test.state.db);
        let result = loyalty_service.redeem_points(user.id, order.id, 100).await;

        assert!(matches!(
            result,
            Err(Error::PaymentError(PaymentError::OrderNotPayable(_)))
        ));

        Ok(())
    }
}
