//! Status lifecycle value objects.
//!
//! Every status column in the database stores the string form of one of
//! these enums. Parsing rejects unknown values, and each enum carries its
//! transition table; services consult `can_transition_to` before writing a
//! new status, so illegal jumps (a closed ticket reopening, a delivered
//! order cancelling) are rejected instead of silently stored.

pub mod order;
pub mod payment;
pub mod rma;
pub mod ticket;

pub use order::OrderStatus;
pub use payment::{InstallmentStatus, PaymentStatus, PlanStatus};
pub use rma::{RmaKind, RmaStatus};
pub use ticket::TicketStatus;
