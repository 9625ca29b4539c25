//! Order management service.
//!
//! Checkout runs in a single database transaction: line snapshots, stock
//! decrements, the promo redemption, and emptying the cart either all commit
//! or all roll back.

use std::str::FromStr;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    data::{
        analytics::AnalyticsRepository,
        cart::CartRepository,
        catalog::ProductRepository,
        order::{NewOrderItem, OrderRepository, OrderTotals},
        payment::PaymentRepository,
        promo::PromoRepository,
    },
    error::{cart::CartError, catalog::CatalogError, order::OrderError, Error},
    gateway,
    model::{
        analytics::EventKind,
        money::Money,
        order::{OrderDto, PlaceOrderDto},
        status::OrderStatus,
    },
    service::payment::PaymentService,
};

/// Service for placing orders and driving their status lifecycle.
pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a gateway::Client,
}

impl<'a> OrderService<'a> {
    /// Creates a new instance of [`OrderService`]
    pub fn new(db: &'a DatabaseConnection, gateway: &'a gateway::Client) -> Self {
        Self { db, gateway }
    }

    /// Places an order from the user's open cart.
    ///
    /// Inside one transaction: validates stock and decrements it, snapshots
    /// the lines, applies the optional promo code, records its redemption,
    /// and empties the cart. A stock shortage or promo violation rolls the
    /// whole checkout back.
    pub async fn place_order(&self, user_id: Uuid, dto: PlaceOrderDto) -> Result<OrderDto, Error> {
        let cart_repo = CartRepository::new(self.db);
        let cart = cart_repo.get_or_create_by_user(user_id).await?;
        let cart_items = cart_repo.get_items(cart.id).await?;

        if cart_items.is_empty() {
            return Err(CartError::EmptyCart.into());
        }

        let txn = self.db.begin().await?;

        let product_repo = ProductRepository::new(&txn);
        let mut subtotal = Money::ZERO;
        let mut lines = Vec::with_capacity(cart_items.len());

        for item in &cart_items {
            let variant = product_repo
                .get_variant(item.variant_id)
                .await?
                .ok_or(CatalogError::VariantNotFound(item.variant_id))?;

            if item.quantity > variant.stock_quantity {
                return Err(CartError::InsufficientStock {
                    variant_id: variant.id,
                    requested: item.quantity,
                    available: variant.stock_quantity,
                }
                .into());
            }

            let product = product_repo
                .get_by_id(variant.product_id)
                .await?
                .ok_or(CatalogError::ProductNotFound(variant.product_id))?;

            let size = variant.size.clone();
            let color = variant.color.clone();
            let remaining = variant.stock_quantity - item.quantity;
            product_repo.set_variant_stock(variant, remaining).await?;

            let unit_price = Money::new(item.unit_price)?;
            subtotal = subtotal.add(unit_price.times(item.quantity));

            lines.push(NewOrderItem {
                variant_id: item.variant_id,
                sku: product.sku,
                name: product.name,
                size,
                color,
                unit_price: item.unit_price,
                quantity: item.quantity,
            });
        }

        let promo = match &dto.promo_code {
            Some(code) => Some(self.validate_promo(&txn, code, user_id).await?),
            None => None,
        };

        let discount = match &promo {
            Some(promo) => subtotal.percent(promo.percent_off),
            None => Money::ZERO,
        };
        let total = subtotal.sub(discount)?;

        let order_repo = OrderRepository::new(&txn);
        let (order, items) = order_repo
            .create(
                user_id,
                OrderTotals {
                    subtotal: subtotal.amount(),
                    discount: discount.amount(),
                    total: total.amount(),
                    currency: "USD".to_string(),
                },
                promo.as_ref().map(|promo| promo.id),
                dto.ship_to_name,
                dto.ship_to_address,
                lines,
            )
            .await?;

        if let Some(promo) = &promo {
            let promo_repo = PromoRepository::new(&txn);
            promo_repo
                .record_redemption(promo.id, user_id, order.id)
                .await?;
        }

        let txn_cart_repo = CartRepository::new(&txn);
        txn_cart_repo.clear(cart.id).await?;

        txn.commit().await?;

        // Analytics are best-effort; a failed insert never fails checkout
        let analytics_repo = AnalyticsRepository::new(self.db);
        if let Err(e) = analytics_repo
            .record(EventKind::Purchase, Some(user_id), None, Some(order.id))
            .await
        {
            tracing::warn!("Failed to record purchase event: {:?}", e);
        }

        tracing::info!(order_id = %order.id, total = %order.total, "Order placed");

        Ok(OrderDto::from_models(order, items))
    }

    /// Retrieves an order. Non-staff callers only see their own orders;
    /// anything else reads as not found.
    pub async fn get_order(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        staff: bool,
    ) -> Result<OrderDto, Error> {
        let order_repo = OrderRepository::new(self.db);

        let order = order_repo
            .get_by_id(order_id)
            .await?
            .filter(|order| staff || order.user_id == user_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let items = order_repo.get_items(order.id).await?;

        Ok(OrderDto::from_models(order, items))
    }

    /// Lists the user's orders, newest first.
    pub async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderDto>, Error> {
        let order_repo = OrderRepository::new(self.db);

        let orders = order_repo.list_by_user(user_id).await?;

        self.with_items(&order_repo, orders).await
    }

    /// Lists all orders in the given status, for staff dashboards.
    pub async fn list_orders_by_status(&self, status: &str) -> Result<Vec<OrderDto>, Error> {
        let status = OrderStatus::from_str(status)?;
        let order_repo = OrderRepository::new(self.db);

        let orders = order_repo.list_by_status(status).await?;

        self.with_items(&order_repo, orders).await
    }

    /// Moves an order to a new status, enforcing the lifecycle table.
    pub async fn update_status(&self, order_id: Uuid, status: &str) -> Result<OrderDto, Error> {
        let next = OrderStatus::from_str(status)?;
        let order_repo = OrderRepository::new(self.db);

        let order = order_repo
            .get_by_id(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let current = OrderStatus::from_str(&order.status)?;

        if !current.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: current,
                to: next,
            }
            .into());
        }

        let order = order_repo.update_status(order, next).await?;
        let items = order_repo.get_items(order.id).await?;

        Ok(OrderDto::from_models(order, items))
    }

    /// Cancels an order, restocking its variants and refunding any captured
    /// payment.
    ///
    /// Restock and the status flip commit together; the gateway refund runs
    /// after the commit so a gateway outage leaves a cancelled order with a
    /// captured payment that staff can refund explicitly.
    pub async fn cancel_order(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        staff: bool,
    ) -> Result<OrderDto, Error> {
        let order_repo = OrderRepository::new(self.db);

        let order = order_repo
            .get_by_id(order_id)
            .await?
            .filter(|order| staff || order.user_id == user_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let current = OrderStatus::from_str(&order.status)?;

        if !current.is_cancellable() {
            return Err(OrderError::NotCancellable(current).into());
        }

        let items = order_repo.get_items(order.id).await?;

        let txn = self.db.begin().await?;

        let product_repo = ProductRepository::new(&txn);
        for item in &items {
            if let Some(variant) = product_repo.get_variant(item.variant_id).await? {
                let restored = variant.stock_quantity + item.quantity;
                product_repo.set_variant_stock(variant, restored).await?;
            }
        }

        let txn_order_repo = OrderRepository::new(&txn);
        let order = txn_order_repo
            .update_status(order, OrderStatus::Cancelled)
            .await?;

        txn.commit().await?;

        let payment_repo = PaymentRepository::new(self.db);
        if payment_repo.get_captured_for_order(order.id).await?.is_some() {
            let payment_service = PaymentService::new(self.db, self.gateway);
            payment_service.refund_order_payment(order.id).await?;
        }

        tracing::info!(order_id = %order.id, "Order cancelled");

        Ok(OrderDto::from_models(order, items))
    }

    /// Validates a promo code for this user at `Utc::now()`.
    async fn validate_promo<C: sea_orm::ConnectionTrait>(
        &self,
        db: &C,
        code: &str,
        user_id: Uuid,
    ) -> Result<entity::promo_code::Model, Error> {
        let promo_repo = PromoRepository::new(db);

        let promo = promo_repo
            .get_by_code(code)
            .await?
            .ok_or_else(|| OrderError::PromoNotFound(code.to_string()))?;

        if !promo.active {
            return Err(OrderError::PromoInactive(code.to_string()).into());
        }

        if let Some(expires_at) = promo.expires_at {
            if expires_at < Utc::now().naive_utc() {
                return Err(OrderError::PromoExpired(code.to_string()).into());
            }
        }

        if promo_repo.has_redeemed(promo.id, user_id).await? {
            return Err(OrderError::PromoAlreadyRedeemed(code.to_string()).into());
        }

        Ok(promo)
    }

    async fn with_items(
        &self,
        order_repo: &OrderRepository<'_, DatabaseConnection>,
        orders: Vec<entity::customer_order::Model>,
    ) -> Result<Vec<OrderDto>, Error> {
        let mut dtos = Vec::with_capacity(orders.len());

        for order in orders {
            let items = order_repo.get_items(order.id).await?;
            dtos.push(OrderDto::from_models(order, items));
        }

        Ok(dtos)
    }
}
