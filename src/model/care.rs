use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Who wrote a ticket message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorKind {
    /// The ticket's customer.
    Customer,
    /// A customer care agent.
    Agent,
    /// Automatic note, e.g. on status changes.
    System,
}

impl AuthorKind {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Agent => "agent",
            Self::System => "system",
        }
    }
}

impl FromStr for AuthorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "agent" => Ok(Self::Agent),
            "system" => Ok(Self::System),
            _ => Err(Error::ParseError(format!(
                "Unknown message author kind: {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for AuthorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TicketDto {
    pub id: Uuid,
    pub subject: String,
    pub status: String,
    pub messages: Vec<TicketMessageDto>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TicketMessageDto {
    pub id: Uuid,
    pub author_kind: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}

impl From<entity::ticket_message::Model> for TicketMessageDto {
    fn from(message: entity::ticket_message::Model) -> Self {
        Self {
            id: message.id,
            author_kind: message.author_kind,
            body: message.body,
            created_at: message.created_at,
        }
    }
}

impl TicketDto {
    /// Assembles the DTO from a ticket row and its message rows.
    pub fn from_models(
        ticket: entity::support_ticket::Model,
        messages: Vec<entity::ticket_message::Model>,
    ) -> Self {
        Self {
            id: ticket.id,
            subject: ticket.subject,
            status: ticket.status,
            messages: messages.into_iter().map(TicketMessageDto::from).collect(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OpenTicketDto {
    pub subject: String,
    /// Initial message from the customer.
    pub body: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PostMessageDto {
    pub body: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateTicketStatusDto {
    pub status: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RmaDto {
    pub id: Uuid,
    pub order_item_id: Uuid,
    pub kind: String,
    pub status: String,
    pub reason: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::rma_request::Model> for RmaDto {
    fn from(rma: entity::rma_request::Model) -> Self {
        Self {
            id: rma.id,
            order_item_id: rma.order_item_id,
            kind: rma.kind,
            status: rma.status,
            reason: rma.reason,
            created_at: rma.created_at,
            updated_at: rma.updated_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RequestRmaDto {
    pub order_item_id: Uuid,
    /// return, repair, or exchange.
    pub kind: String,
    pub reason: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateRmaStatusDto {
    pub status: String,
}
