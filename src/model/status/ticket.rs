use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Lifecycle of a customer support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Awaiting an agent.
    Open,
    /// Waiting on the customer.
    Pending,
    /// Agent considers the issue solved.
    Resolved,
    /// Closed out; no further messages accepted.
    Closed,
}

impl TicketStatus {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Whether moving to `next` is a legal lifecycle step. A closed ticket
    /// stays closed; the customer opens a new one instead.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::Pending)
                | (Self::Open, Self::Resolved)
                | (Self::Pending, Self::Open)
                | (Self::Pending, Self::Resolved)
                | (Self::Resolved, Self::Closed)
        )
    }

    /// Whether new messages are accepted.
    pub fn accepts_messages(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the ticket is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl FromStr for TicketStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "pending" => Ok(Self::Pending),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(Error::ParseError(format!("Unknown ticket status: {:?}", s))),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
