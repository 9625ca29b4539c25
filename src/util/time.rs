//! Time and date calculation utilities.
//!
//! This module provides functions for calculating BNPL installment schedules
//! and the half-open day windows used by the analytics rollup.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime};

use crate::error::Error;

/// Calculates monthly installment due dates.
///
/// Due dates land at one-month intervals starting one month after `from`,
/// so a three-installment plan created on January 15th is due on
/// February 15th, March 15th, and April 15th.
///
/// # Arguments
/// - `from` - Timestamp the plan was created at
/// - `count` - Number of installments
///
/// # Returns
/// - `Ok(Vec<NaiveDateTime>)` - One due date per installment, in order
/// - `Err(Error::ParseError)` - Date arithmetic overflowed
pub fn monthly_due_dates(from: NaiveDateTime, count: u32) -> Result<Vec<NaiveDateTime>, Error> {
    (1..=count)
        .map(|offset| {
            from.checked_add_months(Months::new(offset)).ok_or_else(|| {
                Error::ParseError(format!(
                    "Failed to calculate installment due date {} month(s) after {}",
                    offset, from
                ))
            })
        })
        .collect()
}

/// Calculates the half-open `[start, end)` timestamp window covering `day`.
pub fn day_bounds(day: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
    let start = day.and_hms_opt(0, 0, 0).ok_or_else(|| {
        Error::ParseError(format!("Failed to construct start of day for {}", day))
    })?;

    let end = day
        .checked_add_signed(Duration::days(1))
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            Error::ParseError(format!("Failed to construct end of day for {}", day))
        })?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{day_bounds, monthly_due_dates};

    /// Expect due dates at one-month intervals starting one month out
    #[test]
    fn spaces_due_dates_monthly() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let dates = monthly_due_dates(from, 3).unwrap();

        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0].date(), NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
        assert_eq!(dates[1].date(), NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!(dates[2].date(), NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
    }

    /// Expect month-end dates to clamp rather than skip
    #[test]
    fn clamps_month_end() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let dates = monthly_due_dates(from, 1).unwrap();

        // January 31st + 1 month clamps to February 28th
        assert_eq!(dates[0].date(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    /// Expect the day window to be half-open midnight to midnight
    #[test]
    fn day_window_is_half_open() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        let (start, end) = day_bounds(day).unwrap();

        assert_eq!(start.date(), day);
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2026, 8, 2).unwrap());
        assert_eq!(start.time(), end.time());
    }
}
