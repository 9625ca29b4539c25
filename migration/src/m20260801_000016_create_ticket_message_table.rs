use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000015_create_support_ticket_table::SupportTicket;

static FK_MESSAGE_TICKET_ID: &str = "fk_ticket_message_ticket_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketMessage::Table)
                    .if_not_exists()
                    .col(pk_uuid(TicketMessage::Id))
                    .col(uuid(TicketMessage::TicketId))
                    .col(string(TicketMessage::AuthorKind))
                    .col(uuid_null(TicketMessage::AuthorId))
                    .col(text(TicketMessage::Body))
                    .col(timestamp(TicketMessage::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_MESSAGE_TICKET_ID)
                    .from_tbl(TicketMessage::Table)
                    .from_col(TicketMessage::TicketId)
                    .to_tbl(SupportTicket::Table)
                    .to_col(SupportTicket::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_MESSAGE_TICKET_ID)
                    .table(TicketMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TicketMessage::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TicketMessage {
    Table,
    Id,
    TicketId,
    AuthorKind,
    AuthorId,
    Body,
    CreatedAt,
}
