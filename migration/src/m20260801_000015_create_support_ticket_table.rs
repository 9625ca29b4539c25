use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000001_create_shop_user_table::ShopUser;

static FK_TICKET_USER_ID: &str = "fk_support_ticket_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SupportTicket::Table)
                    .if_not_exists()
                    .col(pk_uuid(SupportTicket::Id))
                    .col(uuid(SupportTicket::UserId))
                    .col(string(SupportTicket::Subject))
                    .col(string(SupportTicket::Status))
                    .col(timestamp(SupportTicket::CreatedAt))
                    .col(timestamp(SupportTicket::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TICKET_USER_ID)
                    .from_tbl(SupportTicket::Table)
                    .from_col(SupportTicket::UserId)
                    .to_tbl(ShopUser::Table)
                    .to_col(ShopUser::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_TICKET_USER_ID)
                    .table(SupportTicket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SupportTicket::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SupportTicket {
    Table,
    Id,
    UserId,
    Subject,
    Status,
    CreatedAt,
    UpdatedAt,
}
