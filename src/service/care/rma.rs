//! RMA (return merchandise authorization) service.
//!
//! Customers file return/repair/exchange requests against delivered order
//! items; agents drive the lifecycle. Moving an RMA to refunded triggers a
//! full gateway refund of the order's captured payment.

use std::str::FromStr;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::{care::rma::RmaRepository, order::OrderRepository},
    error::{care::CareError, Error},
    gateway,
    model::{
        care::{RequestRmaDto, RmaDto, UpdateRmaStatusDto},
        status::{OrderStatus, RmaKind, RmaStatus},
    },
    service::payment::PaymentService,
};

/// Service for RMA requests.
pub struct RmaService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a gateway::Client,
}

impl<'a> RmaService<'a> {
    /// Creates a new instance of [`RmaService`]
    pub fn new(db: &'a DatabaseConnection, gateway: &'a gateway::Client) -> Self {
        Self { db, gateway }
    }

    /// Files an RMA for one of the user's delivered order items.
    pub async fn request_rma(&self, user_id: Uuid, dto: RequestRmaDto) -> Result<RmaDto, Error> {
        let kind = RmaKind::from_str(&dto.kind)?;

        let order_repo = OrderRepository::new(self.db);
        let rma_repo = RmaRepository::new(self.db);

        let item = order_repo
            .get_item(dto.order_item_id)
            .await?
            .ok_or(CareError::OrderItemNotFound(dto.order_item_id))?;

        let order = order_repo
            .get_by_id(item.order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(CareError::OrderItemNotFound(dto.order_item_id))?;

        let status = OrderStatus::from_str(&order.status)?;
        if !matches!(status, OrderStatus::Delivered) {
            return Err(CareError::OrderNotDelivered(order.id).into());
        }

        let rma = rma_repo
            .create(item.id, user_id, kind, dto.reason)
            .await?;

        tracing::info!(rma_id = %rma.id, order_id = %order.id, kind = %kind, "RMA filed");

        Ok(RmaDto::from(rma))
    }

    /// Retrieves an RMA. Non-staff callers only see their own requests.
    pub async fn get_rma(&self, rma_id: Uuid, user_id: Uuid, staff: bool) -> Result<RmaDto, Error> {
        let rma_repo = RmaRepository::new(self.db);

        let rma = rma_repo
            .get_by_id(rma_id)
            .await?
            .filter(|rma| staff || rma.user_id == user_id)
            .ok_or(CareError::RmaNotFound(rma_id))?;

        Ok(RmaDto::from(rma))
    }

    /// Lists the user's RMA requests.
    pub async fn list_rmas(&self, user_id: Uuid) -> Result<Vec<RmaDto>, Error> {
        let rma_repo = RmaRepository::new(self.db);

        let rmas = rma_repo.list_by_user(user_id).await?;

        Ok(rmas.into_iter().map(RmaDto::from).collect())
    }

    /// Moves an RMA to a new status, enforcing the lifecycle table. The
    /// received → refunded transition refunds the order's captured payment
    /// through the gateway before the status is written.
    pub async fn update_status(
        &self,
        rma_id: Uuid,
        dto: UpdateRmaStatusDto,
    ) -> Result<RmaDto, Error> {
        let next = RmaStatus::from_str(&dto.status)?;
        let rma_repo = RmaRepository::new(self.db);

        let rma = rma_repo
            .get_by_id(rma_id)
            .await?
            .ok_or(CareError::RmaNotFound(rma_id))?;

        let current = RmaStatus::from_str(&rma.status)?;

        if !current.can_transition_to(next) {
            return Err(CareError::InvalidRmaTransition {
                from: current,
                to: next,
            }
            .into());
        }

        if matches!(next, RmaStatus::Refunded) {
            self.refund_order_for_rma(&rma).await?;
        }

        let rma = rma_repo.update_status(rma, next).await?;

        tracing::info!(rma_id = %rma.id, status = %next, "RMA status updated");

        Ok(RmaDto::from(rma))
    }

    async fn refund_order_for_rma(&self, rma: &entity::rma_request::Model) -> Result<(), Error> {
        let order_repo = OrderRepository::new(self.db);

        let item = order_repo
            .get_item(rma.order_item_id)
            .await?
            .ok_or(CareError::OrderItemNotFound(rma.order_item_id))?;

        let payment_service = PaymentService::new(self.db, self.gateway);
        payment_service.refund_order_payment(item.order_id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::fixtures::gateway::{mock_charge_endpoint, mock_refund_endpoint};
    use atelier_test_utils::prelude::*;
    use rust_decimal::Decimal;

    use crate::{
        error::{care::CareError, Error},
        model::care::{RequestRmaDto, UpdateRmaStatusDto},
        service::{care::rma::RmaService, payment::PaymentService},
        util::test::gateway_client,
    };

    fn request_dto(order_item_id: uuid::Uuid) -> RequestRmaDto {
        RequestRmaDto {
            order_item_id,
            kind: "return".to_string(),
            reason: "Too small".to_string(),
        }
    }

    /// Expect an RMA against a delivered order to be accepted
    #[tokio::test]
    async fn files_rma_for_delivered_order() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!(entity::prelude::RmaRequest)?;
        let user = test.users().insert_user(1).await?;
        let (_, item) = test
            .orders()
            .insert_order_with_item(user.id, "delivered")
            .await?;
        let gateway = gateway_client(&test.server.url());

        let rma_service = RmaService::new(&test.state.db, &gateway);
        let rma = rma_service.request_rma(user.id, request_dto(item.id)).await?;

        assert_eq!(rma.status, "requested");
        assert_eq!(rma.kind, "return");

        Ok(())
    }

    /// Expect an RMA against an undelivered order to be rejected
    #[tokio::test]
    async fn rejects_rma_for_undelivered_order() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!(entity::prelude::RmaRequest)?;
        let user = test.users().insert_user(1).await?;
        let (_, item) = test
            .orders()
            .insert_order_with_item(user.id, "shipped")
            .await?;
        let gateway = gateway_client(&test.server.url());

        let rma_service = RmaService::new(&test.state.db, &gateway);
        let result = rma_service.request_rma(user.id, request_dto(item.id)).await;

        assert!(matches!(
            result,
            Err(Error::CareError(CareError::OrderNotDelivered(_)))
        ));

        Ok(())
    }

    /// Expect a refund to require the item to have come back first
    #[tokio::test]
    async fn refund_requires_received_item() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!(entity::prelude::RmaRequest)?;
        let user = test.users().insert_user(1).await?;
        let (_, item) = test
            .orders()
            .insert_order_with_item(user.id, "delivered")
            .await?;
        let gateway = gateway_client(&test.server.url());

        let rma_service = RmaService::new(&test.state.db, &gateway);
        let rma = rma_service.request_rma(user.id, request_dto(item.id)).await?;

        let result = rma_service
            .update_status(
                rma.id,
                UpdateRmaStatusDto {
                    status: "refunded".to_string(),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::CareError(CareError::InvalidRmaTransition { .. }))
        ));

        Ok(())
    }

    /// Expect the received → refunded transition to refund the captured payment
    #[tokio::test]
    async fn refund_transition_refunds_payment() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!(entity::prelude::RmaRequest)?;
        let user = test.users().insert_user(1).await?;
        let (order, item) = test
            .orders()
            .insert_order_with_item(user.id, "pending")
            .await?;

        mock_charge_endpoint(&mut test.server, "txn_1", 1);
        let refund_endpoint = mock_refund_endpoint(&mut test.server, "rf_1", 1);
        let gateway = gateway_client(&test.server.url());

        // Capture, then walk the order to delivered
        let payment_service = PaymentService::new(&test.state.db, &gateway);
        payment_service
            .capture_order_payment(order.id, user.id, false)
            .await?;
        test.orders()
            .set_order_status(order.id, "delivered")
            .await?;

        let rma_service = RmaService::new(&test.state.db, &gateway);
        let rma = rma_service.request_rma(user.id, request_dto(item.id)).await?;

        let rma = rma_service
            .update_status(
                rma.id,
                UpdateRmaStatusDto {
                    status: "approved".to_string(),
                },
            )
            .await?;
        let rma = rma_service
            .update_status(
                rma.id,
                UpdateRmaStatusDto {
                    status: "received".to_string(),
                },
            )
            .await?;
        let rma = rma_service
            .update_status(
                rma.id,
                UpdateRmaStatusDto {
                    status: "refunded".to_string(),
                },
            )
            .await?;

        refund_endpoint.assert();
        assert_eq!(rma.status, "refunded");

        Ok(())
    }
}
