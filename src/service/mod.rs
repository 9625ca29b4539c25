//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that implements business logic,
//! coordinates between repositories and the payment gateway, and enforces the
//! status lifecycle rules. Services include the product catalog, cart and
//! checkout, payments and loyalty, customer care, engagement, user accounts,
//! analytics, and retry logic for transient failures.

pub mod analytics;
pub mod care;
pub mod cart;
pub mod catalog;
pub mod engagement;
pub mod loyalty;
pub mod order;
pub mod payment;
pub mod promo;
pub mod retry;
pub mod user;
