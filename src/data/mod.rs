//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the
//! application. Repositories provide an abstraction layer over database
//! operations, organizing data access by domain. Repositories that take part
//! in multi-statement checkout or payment flows are generic over
//! [`sea_orm::ConnectionTrait`] so callers can pass a transaction.

pub mod analytics;
pub mod care;
pub mod cart;
pub mod catalog;
pub mod engagement;
pub mod loyalty;
pub mod order;
pub mod payment;
pub mod promo;
pub mod user;
