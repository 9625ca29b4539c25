//! Scheduled maintenance jobs.
//!
//! This module registers the application's periodic maintenance tasks with a
//! cron scheduler: sweeping past-due BNPL installments to overdue, deleting
//! abandoned carts, and rolling the previous day's orders into the sales
//! aggregate.

pub mod config;
pub mod cron;
pub mod maintenance;
