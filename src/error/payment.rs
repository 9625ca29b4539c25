use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{
    api::ErrorDto,
    status::{InstallmentStatus, OrderStatus, PaymentStatus},
};

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("No payment found for order ID {0}")]
    PaymentNotFound(Uuid),
    #[error("Payment in status {0} cannot be refunded")]
    NotRefundable(PaymentStatus),
    #[error("Order in status {0} cannot accept a payment")]
    OrderNotPayable(OrderStatus),
    #[error("Order ID {0} already has a payment plan")]
    PlanAlreadyExists(Uuid),
    #[error("Installment count must be between 2 and 12, got {0}")]
    InvalidInstallmentCount(i32),
    #[error("Installment ID {0} not found")]
    InstallmentNotFound(Uuid),
    #[error("Installment in status {0} cannot be paid")]
    InstallmentNotPayable(InstallmentStatus),
    #[error("Requested {requested} loyalty points but balance is {available}")]
    InsufficientPoints {
        requested: i64,
        available: i64,
    },
    #[error("Redeemed points must be positive, got {0}")]
    InvalidPointAmount(i64),
    #[error("Promo percent-off must be between 1 and 100, got {0}")]
    InvalidPercentOff(i32),
    #[error("A promo code {0:?} already exists")]
    DuplicatePromoCode(String),
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::PaymentNotFound(_) | Self::InstallmentNotFound(_) => StatusCode::NOT_FOUND,
            Self::NotRefundable(_)
            | Self::OrderNotPayable(_)
            | Self::PlanAlreadyExists(_)
            | Self::InstallmentNotPayable(_)
            | Self::DuplicatePromoCode(_) => StatusCode::CONFLICT,
            Self::InvalidInstallmentCount(_)
            | Self::InsufficientPoints { .. }
            | Self::InvalidPointAmount(_)
            | Self::InvalidPercentOff(_) => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
