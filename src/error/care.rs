use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{
    api::ErrorDto,
    status::{RmaStatus, TicketStatus},
};

#[derive(Error, Debug)]
pub enum CareError {
    #[error("Ticket ID {0} not found")]
    TicketNotFound(Uuid),
    #[error("Ticket ID {0} is closed and accepts no further messages")]
    TicketClosed(Uuid),
    #[error("Cannot transition ticket from {from} to {to}")]
    InvalidTicketTransition {
        from: TicketStatus,
        to: TicketStatus,
    },
    #[error("RMA ID {0} not found")]
    RmaNotFound(Uuid),
    #[error("Cannot transition RMA from {from} to {to}")]
    InvalidRmaTransition {
        from: RmaStatus,
        to: RmaStatus,
    },
    #[error("Order item ID {0} not found")]
    OrderItemNotFound(Uuid),
    #[error("Order ID {0} has not been delivered, so its items are not eligible for RMA")]
    OrderNotDelivered(Uuid),
}

impl IntoResponse for CareError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::TicketNotFound(_) | Self::RmaNotFound(_) | Self::OrderItemNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::TicketClosed(_)
            | Self::InvalidTicketTransition { .. }
            | Self::InvalidRmaTransition { .. }
            | Self::OrderNotDelivered(_) => StatusCode::CONFLICT,
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
