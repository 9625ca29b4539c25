//! HTTP controller endpoints for the Atelier web API.
//!
//! This module contains Axum handlers for the storefront and admin API.
//! Controllers handle HTTP requests, resolve the session user, interact with
//! services, and return appropriate HTTP responses. They integrate with
//! tower-sessions for session management and use utoipa for OpenAPI
//! documentation.

pub mod analytics;
pub mod auth;
pub mod care;
pub mod cart;
pub mod catalog;
pub mod engagement;
pub mod loyalty;
pub mod order;
pub mod payment;
pub mod util;
