use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// What the customer wants done with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmaKind {
    /// Return for refund.
    Return,
    /// Repair and send back.
    Repair,
    /// Exchange for another variant.
    Exchange,
}

impl RmaKind {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Return => "return",
            Self::Repair => "repair",
            Self::Exchange => "exchange",
        }
    }
}

impl FromStr for RmaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "return" => Ok(Self::Return),
            "repair" => Ok(Self::Repair),
            "exchange" => Ok(Self::Exchange),
            _ => Err(Error::ParseError(format!("Unknown RMA kind: {:?}", s))),
        }
    }
}

impl fmt::Display for RmaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a return merchandise authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmaStatus {
    /// Filed by the customer, awaiting review.
    Requested,
    /// Accepted; customer may ship the item back.
    Approved,
    /// Declined by an agent.
    Rejected,
    /// Item arrived back at the warehouse.
    Received,
    /// Refund issued for the returned item.
    Refunded,
    /// Withdrawn after approval.
    Cancelled,
}

impl RmaStatus {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Received => "received",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether moving to `next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: RmaStatus) -> bool {
        matches!(
            (self, next),
            (Self::Requested, Self::Approved)
                | (Self::Requested, Self::Rejected)
                | (Self::Requested, Self::Cancelled)
                | (Self::Approved, Self::Received)
                | (Self::Approved, Self::Cancelled)
                | (Self::Received, Self::Refunded)
        )
    }

    /// Whether an agent accepted the request.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether the request still awaits review.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Requested)
    }

    /// Terminal statuses permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Refunded | Self::Cancelled)
    }
}

impl FromStr for RmaStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "received" => Ok(Self::Received),
            "refunded" => Ok(Self::Refunded),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(Error::ParseError(format!("Unknown RMA status: {:?}", s))),
        }
    }
}

impl fmt::Display for RmaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{RmaKind, RmaStatus};

    const ALL: [RmaStatus; 6] = [
        RmaStatus::Requested,
        RmaStatus::Approved,
        RmaStatus::Rejected,
        RmaStatus::Received,
        RmaStatus::Refunded,
        RmaStatus::Cancelled,
    ];

    /// Expect every enumerated status to round-trip through its string form
    #[test]
    fn round_trips_through_string() {
        for status in ALL {
            assert_eq!(RmaStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    /// Expect Err when parsing an unknown status string
    #[test]
    fn rejects_unknown_status() {
        assert!(RmaStatus::from_str("bogus").is_err());
    }

    /// Expect the approved predicate to hold after parsing
    #[test]
    fn approved_predicate_holds() {
        assert!(RmaStatus::from_str("approved").unwrap().is_approved());
        assert!(!RmaStatus::from_str("requested").unwrap().is_approved());
    }

    /// Expect a rejected request to permit no further transitions
    #[test]
    fn rejected_is_terminal() {
        assert!(RmaStatus::Rejected.is_terminal());
        for next in ALL {
            assert!(!RmaStatus::Rejected.can_transition_to(next));
        }
    }

    /// Expect a refund to require the item to have been received first
    #[test]
    fn refund_requires_received() {
        assert!(!RmaStatus::Requested.can_transition_to(RmaStatus::Refunded));
        assert!(!RmaStatus::Approved.can_transition_to(RmaStatus::Refunded));
        assert!(RmaStatus::Received.can_transition_to(RmaStatus::Refunded));
    }

    /// Expect every RMA kind to round-trip through its string form
    #[test]
    fn kind_round_trips() {
        for kind in [RmaKind::Return, RmaKind::Repair, RmaKind::Exchange] {
            assert_eq!(RmaKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }
}
