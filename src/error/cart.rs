use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Cart item ID {0} not found")]
    ItemNotFound(Uuid),
    #[error("Requested {requested} of variant ID {variant_id} but only {available} in stock")]
    InsufficientStock {
        variant_id: Uuid,
        requested: i32,
        available: i32,
    },
    #[error("Cart item quantity must be positive, got {0}")]
    InvalidQuantity(i32),
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::ItemNotFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientStock { .. } => StatusCode::CONFLICT,
            Self::InvalidQuantity(_) | Self::EmptyCart => StatusCode::BAD_REQUEST,
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
