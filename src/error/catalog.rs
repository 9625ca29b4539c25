use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Product ID {0} not found")]
    ProductNotFound(Uuid),
    #[error("Product variant ID {0} not found")]
    VariantNotFound(Uuid),
    #[error("A product with SKU {0:?} already exists")]
    DuplicateSku(String),
    #[error("Stock adjustment would drop variant ID {variant_id} below zero")]
    NegativeStock {
        variant_id: Uuid,
    },
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::ProductNotFound(_) | Self::VariantNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateSku(_) => StatusCode::CONFLICT,
            Self::NegativeStock { .. } => StatusCode::CONFLICT,
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
