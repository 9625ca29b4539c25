//! Customer care repositories (support tickets, RMA requests).

pub mod rma;
pub mod ticket;
