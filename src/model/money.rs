//! Monetary amount value object.
//!
//! All prices, totals, and refund amounts flow through [`Money`], which
//! guarantees two invariants at construction: the amount is never negative,
//! and it carries exactly two decimal places (midpoint rounds away from
//! zero, so 10.005 becomes 10.01).

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Violations of the [`Money`] construction invariants.
#[derive(Error, Debug, PartialEq)]
pub enum MoneyError {
    /// Negative amounts are never representable.
    #[error("Money amount cannot be negative: {0}")]
    Negative(Decimal),
    /// The string form did not parse as a decimal number.
    #[error("Failed to parse money amount: {0:?}")]
    Unparseable(String),
    /// Subtraction would have produced a negative amount.
    #[error("Money subtraction underflow: {minuend} - {subtrahend}")]
    Underflow {
        /// Left-hand amount.
        minuend: Decimal,
        /// Right-hand amount.
        subtrahend: Decimal,
    },
}

/// A non-negative monetary amount with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    /// Zero, the additive identity.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a monetary amount, rejecting negatives and rounding to
    /// two decimal places.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }

        let mut rounded =
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);

        Ok(Self(rounded))
    }

    /// The underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Adds two amounts.
    pub fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }

    /// Subtracts `other`, failing if the result would be negative.
    pub fn sub(self, other: Money) -> Result<Money, MoneyError> {
        if other.0 > self.0 {
            return Err(MoneyError::Underflow {
                minuend: self.0,
                subtrahend: other.0,
            });
        }

        Money::new(self.0 - other.0)
    }

    /// Multiplies the amount by a line quantity.
    pub fn times(self, quantity: i32) -> Money {
        let mut scaled = self.0 * Decimal::from(quantity);
        scaled.rescale(2);
        Money(scaled)
    }

    /// Takes a percentage of the amount, rounded to two decimal places.
    pub fn percent(self, percent: i32) -> Money {
        let mut portion = (self.0 * Decimal::from(percent) / Decimal::from(100))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        portion.rescale(2);
        Money(portion)
    }

    /// Whole currency units, used for loyalty point accrual.
    pub fn whole_units(&self) -> i64 {
        self.0.trunc().try_into().unwrap_or(0)
    }

    /// Splits the amount into `parts` near-equal shares; the remainder cents
    /// land on the first share so the shares always sum to the whole.
    pub fn split(self, parts: u32) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let cents: i64 = (self.0 * Decimal::from(100)).trunc().try_into().unwrap_or(0);
        let parts = i64::from(parts);
        let base = cents / parts;
        let remainder = cents % parts;

        (0..parts)
            .map(|i| {
                let share = if i == 0 { base + remainder } else { base };
                let mut amount = Decimal::from(share) / Decimal::from(100);
                amount.rescale(2);
                Money(amount)
            })
            .collect()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s).map_err(|_| MoneyError::Unparseable(s.to_string()))?;

        Money::new(amount)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::{Money, MoneyError};

    /// Expect Err when constructing a negative amount
    #[test]
    fn rejects_negative_amount() {
        let result = Money::new(Decimal::new(-100, 2));

        assert!(matches!(result, Err(MoneyError::Negative(_))));
    }

    /// Expect midpoint amounts to round away from zero
    #[test]
    fn rounds_midpoint_up() {
        let money = Money::new(Decimal::from_str("10.005").unwrap()).unwrap();

        assert_eq!(money.to_string(), "10.01");
    }

    /// Expect two decimal places regardless of input scale
    #[test]
    fn normalizes_scale() {
        let money = Money::new(Decimal::from(10)).unwrap();

        assert_eq!(money.to_string(), "10.00");
    }

    /// Expect round-trip through Display and FromStr to hold
    #[test]
    fn round_trips_through_string() {
        let money = Money::new(Decimal::from_str("42.50").unwrap()).unwrap();

        let reparsed = Money::from_str(&money.to_string()).unwrap();

        assert_eq!(reparsed, money);
    }

    /// Expect Err when parsing a non-numeric string
    #[test]
    fn rejects_unparseable_string() {
        let result = Money::from_str("bogus");

        assert!(matches!(result, Err(MoneyError::Unparseable(_))));
    }

    /// Expect subtraction to fail rather than produce a negative amount
    #[test]
    fn subtraction_underflow_fails() {
        let ten = Money::new(Decimal::from(10)).unwrap();
        let twenty = Money::new(Decimal::from(20)).unwrap();

        let result = ten.sub(twenty);

        assert!(matches!(result, Err(MoneyError::Underflow { .. })));
    }

    /// Expect percentage to round to two decimal places
    #[test]
    fn percent_rounds_to_cents() {
        let money = Money::new(Decimal::from_str("19.99").unwrap()).unwrap();

        // 15% of 19.99 = 2.9985 -> 3.00
        assert_eq!(money.percent(15).to_string(), "3.00");
    }

    /// Expect split shares to sum to the original with remainder on the first
    #[test]
    fn split_puts_remainder_on_first_share() {
        let money = Money::new(Decimal::from_str("100.01").unwrap()).unwrap();

        let shares = money.split(3);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].to_string(), "33.35");
        assert_eq!(shares[1].to_string(), "33.33");
        assert_eq!(shares[2].to_string(), "33.33");

        let total = shares
            .into_iter()
            .fold(Money::ZERO, |acc, share| acc.add(share));
        assert_eq!(total, money);
    }

    /// Expect whole currency units for loyalty accrual
    #[test]
    fn whole_units_truncates() {
        let money = Money::new(Decimal::from_str("129.99").unwrap()).unwrap();

        assert_eq!(money.whole_units(), 129);
    }
}
