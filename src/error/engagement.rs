use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum EngagementError {
    #[error("Review rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),
    #[error("A review for this product already exists for this user")]
    DuplicateReview,
    #[error("Review ID {0} not found")]
    ReviewNotFound(Uuid),
}

impl IntoResponse for EngagementError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidRating(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateReview => StatusCode::CONFLICT,
            Self::ReviewNotFound(_) => StatusCode::NOT_FOUND,
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
