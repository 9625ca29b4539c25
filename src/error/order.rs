use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{api::ErrorDto, status::OrderStatus};

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Order ID {0} not found")]
    OrderNotFound(Uuid),
    #[error("Cannot transition order from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },
    #[error("Order in status {0} can no longer be cancelled")]
    NotCancellable(OrderStatus),
    #[error("Promo code {0:?} is not valid")]
    PromoNotFound(String),
    #[error("Promo code {0:?} is inactive")]
    PromoInactive(String),
    #[error("Promo code {0:?} has expired")]
    PromoExpired(String),
    #[error("Promo code {0:?} was already redeemed by this user")]
    PromoAlreadyRedeemed(String),
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::OrderNotFound(_) | Self::PromoNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. }
            | Self::NotCancellable(_)
            | Self::PromoAlreadyRedeemed(_) => StatusCode::CONFLICT,
            Self::PromoInactive(_) | Self::PromoExpired(_) => StatusCode::BAD_REQUEST,
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
