//! Error types for the Atelier server application.
//!
//! This module provides a comprehensive error handling system with specialized
//! error types for different domains (authentication, catalog, cart, orders,
//! payments, customer care, engagement, configuration, payment gateway). All
//! errors implement `IntoResponse` for Axum HTTP responses and use `thiserror`
//! for ergonomic error definitions with automatic `Display` and `Error` trait
//! implementations.

pub mod auth;
pub mod care;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod engagement;
pub mod gateway;
pub mod order;
pub mod payment;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{
        auth::AuthError, care::CareError, cart::CartError, catalog::CatalogError,
        config::ConfigError, engagement::EngagementError, gateway::GatewayError,
        order::OrderError, payment::PaymentError,
    },
    model::{api::ErrorDto, money::MoneyError},
};

/// Main error type for the Atelier server application.
///
/// This enum aggregates all domain-specific error types and external library
/// errors into a single unified error type. It uses `thiserror`'s `#[from]`
/// attribute to enable automatic conversion from underlying error types via
/// the `?` operator. The `IntoResponse` implementation maps errors to
/// appropriate HTTP responses for API consumers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, credentials, role checks).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Product catalog error (unknown products, duplicate SKUs).
    #[error(transparent)]
    CatalogError(#[from] CatalogError),
    /// Cart error (unknown lines, stock ceilings, empty checkout).
    #[error(transparent)]
    CartError(#[from] CartError),
    /// Order error (unknown orders, illegal status transitions, promo rules).
    #[error(transparent)]
    OrderError(#[from] OrderError),
    /// Payment and loyalty error (captures, BNPL plans, point balances).
    #[error(transparent)]
    PaymentError(#[from] PaymentError),
    /// Customer care error (tickets, RMA lifecycle).
    #[error(transparent)]
    CareError(#[from] CareError),
    /// Engagement error (reviews, wishlists).
    #[error(transparent)]
    EngagementError(#[from] EngagementError),
    /// Payment gateway error (transport failures, HTTP errors, declines).
    #[error(transparent)]
    GatewayError(#[from] GatewayError),
    /// Money value object violation (negative or unparseable amounts).
    #[error(transparent)]
    MoneyError(#[from] MoneyError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Atelier's code.
    ///
    /// This error should never occur in normal operation and indicates a
    /// programming error that needs to be reported as a GitHub issue.
    #[error("Internal error with Atelier's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Lets tests propagate application errors through `?` into the test harness's
/// `TestError`. Test-only plumbing; carries the error's display string since the
/// test-utils crate cannot name this type directly.
#[cfg(test)]
impl From<Error> for atelier_test_utils::TestError {
    fn from(err: Error) -> Self {
        atelier_test_utils::TestError::App(err.to_string())
    }
}

/// Converts application errors into HTTP responses.
///
/// Domain errors carry their own response mappings; parse errors of
/// request-supplied values are client errors, and everything else is treated
/// as an internal server error with logging.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::CatalogError(err) => err.into_response(),
            Self::CartError(err) => err.into_response(),
            Self::OrderError(err) => err.into_response(),
            Self::PaymentError(err) => err.into_response(),
            Self::CareError(err) => err.into_response(),
            Self::EngagementError(err) => err.into_response(),
            Self::GatewayError(err) => err.into_response(),
            Self::MoneyError(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            Self::ParseError(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto { error: message }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal
/// Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server
/// error" message to the client to avoid leaking implementation details. Used
/// as a fallback for errors that don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
