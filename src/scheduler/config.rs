//! Cron expressions and thresholds for scheduled maintenance.

/// Hourly sweep flipping past-due scheduled installments to overdue.
pub const OVERDUE_INSTALLMENT_SWEEP_CRON: &str = "0 0 * * * *";

/// Daily cleanup of abandoned carts, at 03:00 UTC.
pub const STALE_CART_CLEANUP_CRON: &str = "0 0 3 * * *";

/// Daily sales rollup for the previous day, at 00:10 UTC.
pub const SALES_ROLLUP_CRON: &str = "0 10 0 * * *";

/// Open carts untouched for this many days are deleted.
pub const STALE_CART_DAYS: i64 = 30;
