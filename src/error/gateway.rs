use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport-level failure talking to the gateway.
    #[error("Payment gateway request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The gateway answered with a non-success HTTP status.
    #[error("Payment gateway returned HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
    },
    /// The gateway processed the request but declined the charge.
    #[error("Payment declined by gateway: {0}")]
    Declined(String),
    /// The client builder was missing required configuration.
    #[error("Payment gateway client missing configuration: {0}")]
    MissingConfig(&'static str),
}

impl GatewayError {
    /// Whether the gateway failure is worth retrying (network trouble or a
    /// gateway-side 5xx). Declines and 4xx responses are final.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Declined(_) | Self::MissingConfig(_) => false,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            Self::Declined(reason) => {
                tracing::debug!(reason = %reason, "Payment declined");

                (
                    StatusCode::PAYMENT_REQUIRED,
                    Json(ErrorDto {
                        error: format!("Payment declined: {}", reason),
                    }),
                )
                    .into_response()
            }
            err => {
                tracing::error!("{}", err);

                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: "Payment gateway unavailable".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
