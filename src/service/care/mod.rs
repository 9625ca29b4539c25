//! Customer care service layer.
//!
//! This module contains business logic services for customer care: support
//! tickets with their message threads, and RMA (return/repair/exchange)
//! requests. Status changes are guarded by the lifecycle tables and leave a
//! system note on the ticket thread.

pub mod rma;

use std::str::FromStr;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::care::ticket::TicketRepository,
    error::{care::CareError, Error},
    model::{
        care::{AuthorKind, OpenTicketDto, PostMessageDto, TicketDto, UpdateTicketStatusDto},
        status::TicketStatus,
    },
};

/// Service for support tickets and their message threads.
pub struct CareService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CareService<'a> {
    /// Creates a new instance of [`CareService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a ticket with the customer's initial message.
    pub async fn open_ticket(&self, user_id: Uuid, dto: OpenTicketDto) -> Result<TicketDto, Error> {
        let ticket_repo = TicketRepository::new(self.db);

        let ticket = ticket_repo.create(user_id, dto.subject).await?;
        ticket_repo
            .add_message(ticket.id, AuthorKind::Customer, Some(user_id), dto.body)
            .await?;

        tracing::info!(ticket_id = %ticket.id, "Support ticket opened");

        self.build_dto(&ticket_repo, ticket).await
    }

    /// Retrieves a ticket with its thread. Non-staff callers only see their
    /// own tickets; anything else reads as not found.
    pub async fn get_ticket(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
        staff: bool,
    ) -> Result<TicketDto, Error> {
        let ticket_repo = TicketRepository::new(self.db);

        let ticket = self
            .get_visible_ticket(&ticket_repo, ticket_id, user_id, staff)
            .await?;

        self.build_dto(&ticket_repo, ticket).await
    }

    /// Lists the user's tickets, most recently updated first.
    pub async fn list_tickets(&self, user_id: Uuid) -> Result<Vec<TicketDto>, Error> {
        let ticket_repo = TicketRepository::new(self.db);

        let tickets = ticket_repo.list_by_user(user_id).await?;

        let mut dtos = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            dtos.push(self.build_dto(&ticket_repo, ticket).await?);
        }

        Ok(dtos)
    }

    /// Lists tickets in a status, for the agent queue.
    pub async fn list_tickets_by_status(&self, status: &str) -> Result<Vec<TicketDto>, Error> {
        let status = TicketStatus::from_str(status)?;
        let ticket_repo = TicketRepository::new(self.db);

        let tickets = ticket_repo.list_by_status(status).await?;

        let mut dtos = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            dtos.push(self.build_dto(&ticket_repo, ticket).await?);
        }

        Ok(dtos)
    }

    /// Posts a message to a ticket. Customers post to their own tickets,
    /// agents to any; closed tickets accept no messages.
    pub async fn post_message(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
        staff: bool,
        dto: PostMessageDto,
    ) -> Result<TicketDto, Error> {
        let ticket_repo = TicketRepository::new(self.db);

        let ticket = self
            .get_visible_ticket(&ticket_repo, ticket_id, user_id, staff)
            .await?;

        let status = TicketStatus::from_str(&ticket.status)?;
        if !status.accepts_messages() {
            return Err(CareError::TicketClosed(ticket.id).into());
        }

        let author_kind = if staff {
            AuthorKind::Agent
        } else {
            AuthorKind::Customer
        };

        ticket_repo
            .add_message(ticket.id, author_kind, Some(user_id), dto.body)
            .await?;

        // Bump updated_at so the agent queue sorts the ticket up
        let ticket = ticket_repo.update_status(ticket, status).await?;

        self.build_dto(&ticket_repo, ticket).await
    }

    /// Moves a ticket to a new status, enforcing the lifecycle table and
    /// appending a system note recording the change.
    pub async fn update_status(
        &self,
        ticket_id: Uuid,
        dto: UpdateTicketStatusDto,
    ) -> Result<TicketDto, Error> {
        let next = TicketStatus::from_str(&dto.status)?;
        let ticket_repo = TicketRepository::new(self.db);

        let ticket = ticket_repo
            .get_by_id(ticket_id)
            .await?
            .ok_or(CareError::TicketNotFound(ticket_id))?;

        let current = TicketStatus::from_str(&ticket.status)?;

        if !current.can_transition_to(next) {
            return Err(CareError::InvalidTicketTransition {
                from: current,
                to: next,
            }
            .into());
        }

        let ticket = ticket_repo.update_status(ticket, next).await?;

        ticket_repo
            .add_message(
                ticket.id,
                AuthorKind::System,
                None,
                format!("Status changed from {} to {}", current, next),
            )
            .await?;

        self.build_dto(&ticket_repo, ticket).await
    }

    async fn get_visible_ticket(
        &self,
        ticket_repo: &TicketRepository<'_>,
        ticket_id: Uuid,
        user_id: Uuid,
        staff: bool,
    ) -> Result<entity::support_ticket::Model, Error> {
        ticket_repo
            .get_by_id(ticket_id)
            .await?
            .filter(|ticket| staff || ticket.user_id == user_id)
            .ok_or_else(|| CareError::TicketNotFound(ticket_id).into())
    }

    async fn build_dto(
        &self,
        ticket_repo: &TicketRepository<'_>,
        ticket: entity::support_ticket::Model,
    ) -> Result<TicketDto, Error> {
        let messages = ticket_repo.get_messages(ticket.id).await?;

        Ok(TicketDto::from_models(ticket, messages))
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;

    use crate::{
        error::{care::CareError, Error},
        model::care::{OpenTicketDto, PostMessageDto, UpdateTicketStatusDto},
        service::care::CareService,
    };

    fn open_dto() -> OpenTicketDto {
        OpenTicketDto {
            subject: "Wrong size shipped".to_string(),
            body: "I ordered M but received S".to_string(),
        }
    }

    /// Expect opening a ticket to record the initial customer message
    #[tokio::test]
    async fn open_ticket_records_initial_message() -> Result<(), TestError> {
        let mut test = test_setup_with_care_tables!()?;
        let user = test.users().insert_user(1).await?;

        let care_service = CareService::new(&test.state.db);
        let ticket = care_service.open_ticket(user.id, open_dto()).await?;

        assert_eq!(ticket.status, "open");
        assert_eq!(ticket.messages.len(), 1);
        assert_eq!(ticket.messages[0].author_kind, "customer");

        Ok(())
    }

    /// Expect a closed ticket to reject new messages
    #[tokio::test]
    async fn closed_ticket_rejects_messages() -> Result<(), TestError> {
        let mut test = test_setup_with_care_tables!()?;
        let user = test.users().insert_user(1).await?;

        let care_service = CareService::new(&test.state.db);
        let ticket = care_service.open_ticket(user.id, open_dto()).await?;

        care_service
            .update_status(
                ticket.id,
                UpdateTicketStatusDto {
                    status: "resolved".to_string(),
                },
            )
            .await?;
        care_service
            .update_status(
                ticket.id,
                UpdateTicketStatusDto {
                    status: "closed".to_string(),
                },
            )
            .await?;

        let result = care_service
            .post_message(
                ticket.id,
                user.id,
                false,
                PostMessageDto {
                    body: "Still broken".to_string(),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::CareError(CareError::TicketClosed(_)))
        ));

        Ok(())
    }

    /// Expect reopening a closed ticket to be rejected
    #[tokio::test]
    async fn closed_ticket_cannot_reopen() -> Result<(), TestError> {
        let mut test = test_setup_with_care_tables!()?;
        let user = test.users().insert_user(1).await?;

        let care_service = CareService::new(&test.state.db);
        let ticket = care_service.open_ticket(user.id, open_dto()).await?;

        care_service
            .update_status(
                ticket.id,
                UpdateTicketStatusDto {
                    status: "resolved".to_string(),
                },
            )
            .await?;
        care_service
            .update_status(
                ticket.id,
                UpdateTicketStatusDto {
                    status: "closed".to_string(),
                },
            )
            .await?;

        let result = care_service
            .update_status(
                ticket.id,
                UpdateTicketStatusDto {
                    status: "pending".to_string(),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::CareError(CareError::InvalidTicketTransition { .. }))
        ));

        Ok(())
    }

    /// Expect a status change to append a system note to the thread
    #[tokio::test]
    async fn status_change_appends_system_note() -> Result<(), TestError> {
        let mut test = test_setup_with_care_tables!()?;
        let user = test.users().insert_user(1).await?;

        let care_service = CareService::new(&test.state.db);
        let ticket = care_service.open_ticket(user.id, open_dto()).await?;

        let ticket = care_service
            .update_status(
                ticket.id,
                UpdateTicketStatusDto {
                    status: "resolved".to_string(),
                },
            )
            .await?;

        let note = ticket.messages.last().unwrap();
        assert_eq!(note.author_kind, "system");
        assert_eq!(note.body, "Status changed from open to resolved");

        Ok(())
    }

    /// Expect another user's ticket to read as not found for non-staff
    #[tokio::test]
    async fn masks_other_users_tickets() -> Result<(), TestError> {
        let mut test = test_setup_with_care_tables!()?;
        let user = test.users().insert_user(1).await?;
        let other = test.users().insert_user(2).await?;

        let care_service = CareService::new(&test.state.db);
        let ticket = care_service.open_ticket(user.id, open_dto()).await?;

        let result = care_service.get_ticket(ticket.id, other.id, false).await;
        assert!(matches!(
            result,
            Err(Error::CareError(CareError::TicketNotFound(_)))
        ));

        // Agents see every ticket
        let found = care_service.get_ticket(ticket.id, other.id, true).await;
        assert!(found.is_ok());

        Ok(())
    }
}
