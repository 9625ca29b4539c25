//! Shared helpers for controllers.

pub mod current_user;
