use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Lifecycle of a single payment against the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Created, not yet sent to the gateway.
    Pending,
    /// Funds reserved by the gateway.
    Authorized,
    /// Funds captured.
    Captured,
    /// Declined or errored at the gateway.
    Failed,
    /// Captured funds returned to the customer.
    Refunded,
}

impl PaymentStatus {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Captured => "captured",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Whether moving to `next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Authorized)
                | (Self::Pending, Self::Failed)
                | (Self::Authorized, Self::Captured)
                | (Self::Authorized, Self::Failed)
                | (Self::Captured, Self::Refunded)
        )
    }

    /// Whether the funds were captured.
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured)
    }

    /// Whether the payment can still be refunded.
    pub fn is_refundable(&self) -> bool {
        self.can_transition_to(Self::Refunded)
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "authorized" => Ok(Self::Authorized),
            "captured" => Ok(Self::Captured),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(Error::ParseError(format!(
                "Unknown payment status: {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single BNPL installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallmentStatus {
    /// Waiting for its due date.
    Scheduled,
    /// Paid in full.
    Paid,
    /// Past due without payment.
    Overdue,
}

impl InstallmentStatus {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Whether moving to `next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: InstallmentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Paid)
                | (Self::Scheduled, Self::Overdue)
                | (Self::Overdue, Self::Paid)
        )
    }

    /// Whether this installment still awaits payment.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Overdue)
    }
}

impl FromStr for InstallmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            _ => Err(Error::ParseError(format!(
                "Unknown installment status: {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a BNPL payment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    /// Installments outstanding.
    Active,
    /// Every installment paid.
    Completed,
}

impl PlanStatus {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::ParseError(format!("Unknown plan status: {:?}", s))),
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{InstallmentStatus, PaymentStatus};

    /// Expect every enumerated payment status to round-trip through its string form
    #[test]
    fn payment_status_round_trips() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Authorized,
            PaymentStatus::Captured,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(PaymentStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    /// Expect Err when parsing an unknown payment status
    #[test]
    fn payment_status_rejects_unknown() {
        assert!(PaymentStatus::from_str("bogus").is_err());
    }

    /// Expect only captured payments to be refundable
    #[test]
    fn only_captured_payments_refund() {
        assert!(PaymentStatus::Captured.is_refundable());
        assert!(!PaymentStatus::Pending.is_refundable());
        assert!(!PaymentStatus::Failed.is_refundable());
        assert!(!PaymentStatus::Refunded.is_refundable());
    }

    /// Expect an overdue installment to still accept payment
    #[test]
    fn overdue_installment_can_be_paid() {
        assert!(InstallmentStatus::Overdue.can_transition_to(InstallmentStatus::Paid));
        assert!(InstallmentStatus::Overdue.is_outstanding());
    }

    /// Expect a paid installment to reject further transitions
    #[test]
    fn paid_installment_is_final() {
        for next in [
            InstallmentStatus::Scheduled,
            InstallmentStatus::Paid,
            InstallmentStatus::Overdue,
        ] {
            assert!(!InstallmentStatus::Paid.can_transition_to(next));
        }
    }
}
