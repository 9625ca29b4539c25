//! Request and response bodies for the payment gateway API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Charge request sent to `POST /v1/charges`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Order the charge belongs to, used by the gateway for idempotency.
    pub order_id: Uuid,
    /// Amount to capture, two decimal places.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Gateway answer to a charge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeOutcome {
    /// Gateway-side transaction reference.
    pub reference: String,
    /// Whether the charge was approved and captured.
    pub approved: bool,
    /// Human-readable decline reason when not approved.
    pub decline_reason: Option<String>,
}

/// Refund request sent to `POST /v1/refunds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Reference of the captured charge being refunded.
    pub reference: String,
    /// Amount to refund, two decimal places.
    pub amount: Decimal,
}

/// Gateway answer to a refund request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundOutcome {
    /// Gateway-side refund reference.
    pub reference: String,
    /// Whether the refund was accepted.
    pub refunded: bool,
}
