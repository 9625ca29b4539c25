//! Payment service.
//!
//! Talks to the payment gateway for captures and refunds, keeps the payment
//! rows in step with the order lifecycle, and manages BNPL plans. Gateway
//! calls retry on transport failures and gateway-side 5xx responses; declines
//! fail immediately.

use std::str::FromStr;

use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    data::{
        loyalty::LoyaltyRepository,
        order::OrderRepository,
        payment::PaymentRepository,
    },
    error::{gateway::GatewayError, order::OrderError, payment::PaymentError, Error},
    gateway::{
        self,
        model::{ChargeRequest, RefundRequest},
    },
    model::{
        money::Money,
        payment::{CreatePlanDto, PaymentDto, PlanDto},
        status::{InstallmentStatus, OrderStatus, PaymentStatus, PlanStatus},
    },
    service::retry::RetryContext,
    util,
};

/// Loyalty points earned per whole currency unit captured.
const POINTS_PER_CURRENCY_UNIT: i64 = 1;

/// Service for capturing, refunding, and installment-splitting payments.
pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a gateway::Client,
}

impl<'a> PaymentService<'a> {
    /// Creates a new instance of [`PaymentService`]
    pub fn new(db: &'a DatabaseConnection, gateway: &'a gateway::Client) -> Self {
        Self { db, gateway }
    }

    /// Captures the full payment for a pending order.
    ///
    /// Idempotent per order: an already-captured payment is returned without
    /// touching the gateway again. On capture the order moves to paid and
    /// loyalty points are awarded, one point per whole currency unit.
    pub async fn capture_order_payment(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        staff: bool,
    ) -> Result<PaymentDto, Error> {
        let order_repo = OrderRepository::new(self.db);
        let payment_repo = PaymentRepository::new(self.db);

        let order = order_repo
            .get_by_id(order_id)
            .await?
            .filter(|order| staff || order.user_id == user_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if let Some(existing) = payment_repo.get_captured_for_order(order.id).await? {
            tracing::debug!(order_id = %order.id, "Payment already captured, skipping gateway");
            return Ok(PaymentDto::from(existing));
        }

        let status = OrderStatus::from_str(&order.status)?;
        if !matches!(status, OrderStatus::Pending) {
            return Err(PaymentError::OrderNotPayable(status).into());
        }

        let outcome = self
            .charge_with_retry(order.id, Money::new(order.total)?, &order.currency)
            .await?;

        if !outcome.approved {
            let reason = outcome
                .decline_reason
                .unwrap_or_else(|| "declined".to_string());

            payment_repo
                .create(
                    order.id,
                    None,
                    order.total,
                    order.currency.clone(),
                    PaymentStatus::Failed,
                    Some(outcome.reference),
                )
                .await?;

            return Err(GatewayError::Declined(reason).into());
        }

        let payment = payment_repo
            .create(
                order.id,
                None,
                order.total,
                order.currency.clone(),
                PaymentStatus::Captured,
                Some(outcome.reference),
            )
            .await?;

        order_repo.update_status(order, OrderStatus::Paid).await?;

        self.award_points(user_id, &payment).await?;

        tracing::info!(order_id = %order_id, payment_id = %payment.id, "Payment captured");

        Ok(PaymentDto::from(payment))
    }

    /// Refunds the order's captured payment in full through the gateway.
    pub async fn refund_order_payment(&self, order_id: Uuid) -> Result<PaymentDto, Error> {
        let payment_repo = PaymentRepository::new(self.db);

        let payment = payment_repo
            .get_captured_for_order(order_id)
            .await?
            .ok_or(PaymentError::PaymentNotFound(order_id))?;

        let status = PaymentStatus::from_str(&payment.status)?;
        if !status.is_refundable() {
            return Err(PaymentError::NotRefundable(status).into());
        }

        let reference = payment.gateway_reference.clone().ok_or_else(|| {
            Error::InternalError(format!(
                "Captured payment ID {} has no gateway reference",
                payment.id
            ))
        })?;

        let amount = payment.amount;
        let gateway = self.gateway.clone();

        let mut ctx: RetryContext<()> = RetryContext::new();
        ctx.execute_with_retry(&format!("refund for order ID {}", order_id), |_| {
            let gateway = gateway.clone();
            let reference = reference.clone();

            Box::pin(async move {
                let outcome = gateway
                    .refund(&RefundRequest { reference, amount })
                    .await?;

                if !outcome.refunded {
                    return Err(GatewayError::Declined("refund rejected".to_string()).into());
                }

                Ok(())
            })
        })
        .await?;

        let payment = payment_repo
            .update_status(payment, PaymentStatus::Refunded)
            .await?;

        tracing::info!(order_id = %order_id, payment_id = %payment.id, "Payment refunded");

        Ok(PaymentDto::from(payment))
    }

    /// Creates a BNPL plan splitting the order total into equal monthly
    /// installments; remainder cents land on the first installment.
    pub async fn create_plan(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        dto: CreatePlanDto,
    ) -> Result<PlanDto, Error> {
        if !(2..=12).contains(&dto.installment_count) {
            return Err(PaymentError::InvalidInstallmentCount(dto.installment_count).into());
        }

        let order_repo = OrderRepository::new(self.db);
        let payment_repo = PaymentRepository::new(self.db);

        let order = order_repo
            .get_by_id(order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let status = OrderStatus::from_str(&order.status)?;
        if !matches!(status, OrderStatus::Pending) {
            return Err(PaymentError::OrderNotPayable(status).into());
        }

        if payment_repo.get_plan_by_order(order.id).await?.is_some() {
            return Err(PaymentError::PlanAlreadyExists(order.id).into());
        }

        let total = Money::new(order.total)?;
        let shares = total.split(dto.installment_count as u32);
        let due_dates =
            util::time::monthly_due_dates(order.placed_at, dto.installment_count as u32)?;

        let schedule = shares
            .into_iter()
            .zip(due_dates)
            .map(|(share, due)| (share.amount(), due))
            .collect();

        let txn = self.db.begin().await?;

        let txn_payment_repo = PaymentRepository::new(&txn);
        let plan = txn_payment_repo
            .create_plan(order.id, dto.installment_count)
            .await?;
        let installments = txn_payment_repo
            .create_installments(plan.id, schedule)
            .await?;

        txn.commit().await?;

        tracing::info!(
            order_id = %order.id,
            plan_id = %plan.id,
            installments = dto.installment_count,
            "Payment plan created"
        );

        Ok(PlanDto::from_models(plan, installments))
    }

    /// Retrieves the order's plan with its installments.
    pub async fn get_plan(&self, order_id: Uuid, user_id: Uuid) -> Result<PlanDto, Error> {
        let order_repo = OrderRepository::new(self.db);
        let payment_repo = PaymentRepository::new(self.db);

        let order = order_repo
            .get_by_id(order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let plan = payment_repo
            .get_plan_by_order(order.id)
            .await?
            .ok_or(PaymentError::PaymentNotFound(order.id))?;

        let installments = payment_repo.get_installments(plan.id).await?;

        Ok(PlanDto::from_models(plan, installments))
    }

    /// Captures one installment through the gateway. The last paid
    /// installment completes the plan and marks the order paid.
    pub async fn pay_installment(
        &self,
        installment_id: Uuid,
        user_id: Uuid,
    ) -> Result<PlanDto, Error> {
        let payment_repo = PaymentRepository::new(self.db);
        let order_repo = OrderRepository::new(self.db);

        let installment = payment_repo
            .get_installment(installment_id)
            .await?
            .ok_or(PaymentError::InstallmentNotFound(installment_id))?;

        let installment_status = InstallmentStatus::from_str(&installment.status)?;
        if !installment_status.is_outstanding() {
            return Err(PaymentError::InstallmentNotPayable(installment_status).into());
        }

        let plan = payment_repo
            .get_plan(installment.plan_id)
            .await?
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Installment ID {} references missing plan ID {}",
                    installment.id, installment.plan_id
                ))
            })?;

        let order = order_repo
            .get_by_id(plan.order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(OrderError::OrderNotFound(plan.order_id))?;

        let outcome = self
            .charge_with_retry(order.id, Money::new(installment.amount)?, &order.currency)
            .await?;

        if !outcome.approved {
            let reason = outcome
                .decline_reason
                .unwrap_or_else(|| "declined".to_string());

            return Err(GatewayError::Declined(reason).into());
        }

        payment_repo
            .create(
                order.id,
                Some(installment.id),
                installment.amount,
                order.currency.clone(),
                PaymentStatus::Captured,
                Some(outcome.reference),
            )
            .await?;

        payment_repo
            .update_installment_status(installment, InstallmentStatus::Paid)
            .await?;

        let plan = if payment_repo.count_outstanding(plan.id).await? == 0 {
            let plan = payment_repo
                .update_plan_status(plan, PlanStatus::Completed)
                .await?;

            let order_status = OrderStatus::from_str(&order.status)?;
            if order_status.can_transition_to(OrderStatus::Paid) {
                order_repo.update_status(order, OrderStatus::Paid).await?;
            }

            self.award_points_for_plan(user_id, &plan).await?;

            plan
        } else {
            plan
        };

        let installments = payment_repo.get_installments(plan.id).await?;

        Ok(PlanDto::from_models(plan, installments))
    }

    /// Flips scheduled installments past their due date to overdue. Run by
    /// the scheduler; returns the number flipped.
    pub async fn mark_overdue_installments(&self) -> Result<u64, Error> {
        let payment_repo = PaymentRepository::new(self.db);

        let flipped = payment_repo
            .mark_overdue(chrono::Utc::now().naive_utc())
            .await?;

        if flipped > 0 {
            tracing::info!(count = flipped, "Marked installments overdue");
        }

        Ok(flipped)
    }

    async fn charge_with_retry(
        &self,
        order_id: Uuid,
        amount: Money,
        currency: &str,
    ) -> Result<gateway::model::ChargeOutcome, Error> {
        let gateway = self.gateway.clone();
        let currency = currency.to_string();

        let mut ctx: RetryContext<()> = RetryContext::new();
        ctx.execute_with_retry(&format!("payment capture for order ID {}", order_id), |_| {
            let gateway = gateway.clone();
            let currency = currency.clone();

            Box::pin(async move {
                let outcome = gateway
                    .charge(&ChargeRequest {
                        order_id,
                        amount: amount.amount(),
                        currency,
                    })
                    .await?;

                Ok(outcome)
            })
        })
        .await
    }

    async fn award_points(
        &self,
        user_id: Uuid,
        payment: &entity::payment::Model,
    ) -> Result<(), Error> {
        let loyalty_repo = LoyaltyRepository::new(self.db);

        let points = Money::new(payment.amount)?.whole_units() * POINTS_PER_CURRENCY_UNIT;
        if points == 0 {
            return Ok(());
        }

        let account = loyalty_repo.get_or_create_account(user_id).await?;
        loyalty_repo
            .apply_delta(
                account,
                points,
                "Points earned on order".to_string(),
                Some(payment.order_id),
            )
            .await?;

        Ok(())
    }

    async fn award_points_for_plan(
        &self,
        user_id: Uuid,
        plan: &entity::payment_plan::Model,
    ) -> Result<(), Error> {
        let order_repo = OrderRepository::new(self.db);
        let loyalty_repo = LoyaltyRepository::new(self.db);

        let Some(order) = order_repo.get_by_id(plan.order_id).await? else {
            return Ok(());
        };

        let points = Money::new(order.total)?.whole_units() * POINTS_PER_CURRENCY_UNIT;
        if points == 0 {
            return Ok(());
        }

        let account = loyalty_repo.get_or_create_account(user_id).await?;
        loyalty_repo
            .apply_delta(
                account,
                points,
                "Points earned on completed payment plan".to_string(),
                Some(order.id),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::fixtures::gateway::{
        mock_charge_declined, mock_charge_endpoint, mock_charge_server_error,
        mock_refund_endpoint,
    };
    use atelier_test_utils::prelude::*;
    use rust_decimal::Decimal;

    use crate::{
        data::{loyalty::LoyaltyRepository, order::OrderRepository, payment::PaymentRepository},
        error::{payment::PaymentError, Error},
        model::payment::CreatePlanDto,
        service::payment::PaymentService,
        util::test::gateway_client,
    };

    /// Expect capture to record the payment, pay the order, and award points
    #[tokio::test]
    async fn capture_pays_order_and_awards_points() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(12999, 2))
            .await?;

        let endpoint = mock_charge_endpoint(&mut test.server, "txn_1", 1);
        let gateway = gateway_client(&test.server.url());

        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let payment = payment_service
            .capture_order_payment(order.id, user.id, false)
            .await?;

        endpoint.assert();
        assert_eq!(payment.status, "captured");
        assert_eq!(payment.gateway_reference.as_deref(), Some("txn_1"));

        let order_repo = OrderRepository::new(&test.state.db);
        let order = order_repo.get_by_id(order.id).await?.unwrap();
        assert_eq!(order.status, "paid");

        // 129.99 earns 129 points
        let loyalty_repo = LoyaltyRepository::new(&test.state.db);
        let account = loyalty_repo.get_or_create_account(user.id).await?;
        assert_eq!(account.points_balance, 129);

        Ok(())
    }

    /// Expect a second capture to skip the gateway entirely
    #[tokio::test]
    async fn capture_is_idempotent() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(2900, 2))
            .await?;

        // The mock endpoint only tolerates a single request
        let endpoint = mock_charge_endpoint(&mut test.server, "txn_1", 1);
        let gateway = gateway_client(&test.server.url());

        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let first = payment_service
            .capture_order_payment(order.id, user.id, false)
            .await?;
        let second = payment_service
            .capture_order_payment(order.id, user.id, false)
            .await?;

        endpoint.assert();
        assert_eq!(first.id, second.id);

        Ok(())
    }

    /// Expect a decline to record a failed payment and leave the order pending
    #[tokio::test]
    async fn decline_leaves_order_pending() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(2900, 2))
            .await?;

        let endpoint = mock_charge_declined(&mut test.server, "insufficient funds", 1);
        let gateway = gateway_client(&test.server.url());

        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let result = payment_service
            .capture_order_payment(order.id, user.id, false)
            .await;

        endpoint.assert();
        assert!(matches!(result, Err(Error::GatewayError(_))));

        let order_repo = OrderRepository::new(&test.state.db);
        let order = order_repo.get_by_id(order.id).await?.unwrap();
        assert_eq!(order.status, "pending");

        let payment_repo = PaymentRepository::new(&test.state.db);
        let payments = payment_repo.list_for_order(order.id).await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].status, "failed");

        Ok(())
    }

    /// Expect gateway 5xx responses to be retried until the attempt budget runs out
    #[tokio::test]
    async fn gateway_errors_retry_then_fail() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(2900, 2))
            .await?;

        // Three attempts, all answered with a 502
        let endpoint = mock_charge_server_error(&mut test.server, 3);
        let gateway = gateway_client(&test.server.url());

        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let result = payment_service
            .capture_order_payment(order.id, user.id, false)
            .await;

        endpoint.assert();
        assert!(matches!(result, Err(Error::GatewayError(_))));

        Ok(())
    }

    /// Expect the BNPL split to sum to the total with the remainder up front
    #[tokio::test]
    async fn plan_splits_total_with_remainder_first() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(10000, 2))
            .await?;

        let gateway = gateway_client(&test.server.url());
        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let plan = payment_service
            .create_plan(order.id, user.id, CreatePlanDto { installment_count: 3 })
            .await?;

        assert_eq!(plan.installments.len(), 3);
        assert_eq!(plan.installments[0].amount, Decimal::new(3334, 2));
        assert_eq!(plan.installments[1].amount, Decimal::new(3333, 2));
        assert_eq!(plan.installments[2].amount, Decimal::new(3333, 2));

        let sum: Decimal = plan
            .installments
            .iter()
            .map(|installment| installment.amount)
            .sum();
        assert_eq!(sum, Decimal::new(10000, 2));

        Ok(())
    }

    /// Expect an out-of-range installment count to be rejected
    #[tokio::test]
    async fn rejects_invalid_installment_count() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(10000, 2))
            .await?;

        let gateway = gateway_client(&test.server.url());
        let payment_service = PaymentService::new(&test.state.db, &gateway);

        for count in [0, 1, 13] {
            let result = payment_service
                .create_plan(
                    order.id,
                    user.id,
                    CreatePlanDto {
                        installment_count: count,
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::PaymentError(PaymentError::InvalidInstallmentCount(_)))
            ));
        }

        Ok(())
    }

    /// Expect a second plan on the same order to be rejected
    #[tokio::test]
    async fn rejects_duplicate_plan() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(10000, 2))
            .await?;

        let gateway = gateway_client(&test.server.url());
        let payment_service = PaymentService::new(&test.state.db, &gateway);
        payment_service
            .create_plan(order.id, user.id, CreatePlanDto { installment_count: 2 })
            .await?;

        let result = payment_service
            .create_plan(order.id, user.id, CreatePlanDto { installment_count: 2 })
            .await;

        assert!(matches!(
            result,
            Err(Error::PaymentError(PaymentError::PlanAlreadyExists(_)))
        ));

        Ok(())
    }

    /// Expect paying every installment to complete the plan and the order
    #[tokio::test]
    async fn last_installment_completes_plan_and_order() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(10000, 2))
            .await?;

        let endpoint = mock_charge_endpoint(&mut test.server, "txn_bnpl", 2);
        let gateway = gateway_client(&test.server.url());

        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let plan = payment_service
            .create_plan(order.id, user.id, CreatePlanDto { installment_count: 2 })
            .await?;

        let plan = payment_service
            .pay_installment(plan.installments[0].id, user.id)
            .await?;
        assert_eq!(plan.status, "active");

        let plan = payment_service
            .pay_installment(plan.installments[1].id, user.id)
            .await?;
        assert_eq!(plan.status, "completed");

        endpoint.assert();

        let order_repo = OrderRepository::new(&test.state.db);
        let order = order_repo.get_by_id(order.id).await?.unwrap();
        assert_eq!(order.status, "paid");

        Ok(())
    }

    /// Expect an already-paid installment to reject another payment
    #[tokio::test]
    async fn rejects_double_installment_payment() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(10000, 2))
            .await?;

        mock_charge_endpoint(&mut test.server, "txn_bnpl", 1);
        let gateway = gateway_client(&test.server.url());

        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let plan = payment_service
            .create_plan(order.id, user.id, CreatePlanDto { installment_count: 2 })
            .await?;

        let installment_id = plan.installments[0].id;
        payment_service
            .pay_installment(installment_id, user.id)
            .await?;

        let result = payment_service
            .pay_installment(installment_id, user.id)
            .await;

        assert!(matches!(
            result,
            Err(Error::PaymentError(PaymentError::InstallmentNotPayable(_)))
        ));

        Ok(())
    }

    /// Expect refund to flip the captured payment to refunded
    #[tokio::test]
    async fn refund_flips_captured_payment() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(2900, 2))
            .await?;

        mock_charge_endpoint(&mut test.server, "txn_1", 1);
        let refund_endpoint = mock_refund_endpoint(&mut test.server, "rf_1", 1);
        let gateway = gateway_client(&test.server.url());

        let payment_service = PaymentService::new(&test.state.db, &gateway);
        payment_service
            .capture_order_payment(order.id, user.id, false)
            .await?;

        let payment = payment_service.refund_order_payment(order.id).await?;

        refund_endpoint.assert();
        assert_eq!(payment.status, "refunded");

        Ok(())
    }

    /// Expect refund of an order with no captured payment to fail
    #[tokio::test]
    async fn refund_without_capture_fails() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(2900, 2))
            .await?;

        let gateway = gateway_client(&test.server.url());
        let payment_service = PaymentService::new(&test.state.db, &gateway);
        let result = payment_service.refund_order_payment(order.id).await;

        assert!(matches!(
            result,
            Err(Error::PaymentError(PaymentError::PaymentNotFound(_)))
        ));

        Ok(())
    }
}
