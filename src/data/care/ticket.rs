use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::model::{care::AuthorKind, status::TicketStatus};

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new instance of [`TicketRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        subject: String,
    ) -> Result<entity::support_ticket::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let ticket = entity::support_ticket::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            subject: ActiveValue::Set(subject),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        ticket.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        ticket_id: Uuid,
    ) -> Result<Option<entity::support_ticket::Model>, DbErr> {
        entity::prelude::SupportTicket::find_by_id(ticket_id)
            .one(self.db)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<entity::support_ticket::Model>, DbErr> {
        entity::prelude::SupportTicket::find()
            .filter(entity::support_ticket::Column::UserId.eq(user_id))
            .order_by_desc(entity::support_ticket::Column::UpdatedAt)
            .all(self.db)
            .await
    }

    pub async fn list_by_status(
        &self,
        status: TicketStatus,
    ) -> Result<Vec<entity::support_ticket::Model>, DbErr> {
        entity::prelude::SupportTicket::find()
            .filter(entity::support_ticket::Column::Status.eq(status.as_str()))
            .order_by_desc(entity::support_ticket::Column::UpdatedAt)
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        ticket: entity::support_ticket::Model,
        status: TicketStatus,
    ) -> Result<entity::support_ticket::Model, DbErr> {
        let mut ticket: entity::support_ticket::ActiveModel = ticket.into();
        ticket.status = ActiveValue::Set(status.as_str().to_string());
        ticket.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        ticket.update(self.db).await
    }

    pub async fn add_message(
        &self,
        ticket_id: Uuid,
        author_kind: AuthorKind,
        author_id: Option<Uuid>,
        body: String,
    ) -> Result<entity::ticket_message::Model, DbErr> {
        let message = entity::ticket_message::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            ticket_id: ActiveValue::Set(ticket_id),
            author_kind: ActiveValue::Set(author_kind.as_str().to_string()),
            author_id: ActiveValue::Set(author_id),
            body: ActiveValue::Set(body),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        message.insert(self.db).await
    }

    pub async fn get_messages(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<entity::ticket_message::Model>, DbErr> {
        entity::prelude::TicketMessage::find()
            .filter(entity::ticket_message::Column::TicketId.eq(ticket_id))
            .order_by_asc(entity::ticket_message::Column::CreatedAt)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use uuid::Uuid;

    use crate::{
        data::care::ticket::TicketRepository,
        model::{care::AuthorKind, status::TicketStatus},
    };

    /// Expect new tickets to open in the open status
    #[tokio::test]
    async fn creates_open_ticket() -> Result<(), TestError> {
        let mut test = test_setup_with_tables!(
            entity::prelude::ShopUser,
            entity::prelude::SupportTicket,
            entity::prelude::TicketMessage
        )?;
        let user = test.users().insert_user(1).await?;

        let ticket_repo = TicketRepository::new(&test.state.db);
        let ticket = ticket_repo
            .create(user.id, "Wrong size shipped".to_string())
            .await?;

        assert_eq!(ticket.status, "open");
        assert_eq!(ticket.user_id, user.id);

        Ok(())
    }

    /// Expect messages to come back in chronological order
    #[tokio::test]
    async fn returns_messages_in_order() -> Result<(), TestError> {
        let mut test = test_setup_with_tables!(
            entity::prelude::ShopUser,
            entity::prelude::SupportTicket,
            entity::prelude::TicketMessage
        )?;
        let user = test.users().insert_user(1).await?;

        let ticket_repo = TicketRepository::new(&test.state.db);
        let ticket = ticket_repo
            .create(user.id, "Wrong size shipped".to_string())
            .await?;

        ticket_repo
            .add_message(
                ticket.id,
                AuthorKind::Customer,
                Some(user.id),
                "I ordered M but received S".to_string(),
            )
            .await?;
        ticket_repo
            .add_message(
                ticket.id,
                AuthorKind::Agent,
                None,
                "Sorry about that, sending a replacement".to_string(),
            )
            .await?;

        let messages = ticket_repo.get_messages(ticket.id).await?;

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author_kind, "customer");
        assert_eq!(messages[1].author_kind, "agent");

        Ok(())
    }

    /// Expect status updates to bump updated_at
    #[tokio::test]
    async fn update_status_writes_new_status() -> Result<(), TestError> {
        let mut test = test_setup_with_tables!(
            entity::prelude::ShopUser,
            entity::prelude::SupportTicket,
            entity::prelude::TicketMessage
        )?;
        let user = test.users().insert_user(1).await?;

        let ticket_repo = TicketRepository::new(&test.state.db);
        let ticket = ticket_repo
            .create(user.id, "Wrong size shipped".to_string())
            .await?;

        let ticket = ticket_repo
            .update_status(ticket, TicketStatus::Resolved)
            .await?;

        assert_eq!(ticket.status, "resolved");

        Ok(())
    }

    /// Expect None for a ticket ID that does not exist
    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::ShopUser,
            entity::prelude::SupportTicket,
            entity::prelude::TicketMessage
        )?;

        let ticket_repo = TicketRepository::new(&test.state.db);
        let result = ticket_repo.get_by_id(Uuid::new_v4()).await?;

        assert!(result.is_none());

        Ok(())
    }
}
