use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000001_create_shop_user_table::ShopUser,
    m20260801_000008_create_order_item_table::OrderItem,
};

static FK_RMA_ORDER_ITEM_ID: &str = "fk_rma_request_order_item_id";
static FK_RMA_USER_ID: &str = "fk_rma_request_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RmaRequest::Table)
                    .if_not_exists()
                    .col(pk_uuid(RmaRequest::Id))
                    .col(uuid(RmaRequest::OrderItemId))
                    .col(uuid(RmaRequest::UserId))
                    .col(string(RmaRequest::Kind))
                    .col(string(RmaRequest::Status))
                    .col(text(RmaRequest::Reason))
                    .col(timestamp(RmaRequest::CreatedAt))
                    .col(timestamp(RmaRequest::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RMA_ORDER_ITEM_ID)
                    .from_tbl(RmaRequest::Table)
                    .from_col(RmaRequest::OrderItemId)
                    .to_tbl(OrderItem::Table)
                    .to_col(OrderItem::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RMA_USER_ID)
                    .from_tbl(RmaRequest::Table)
                    .from_col(RmaRequest::UserId)
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
                    .name(FK_RMA_ORDER_ITEM_ID)
                    .table(RmaRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RMA_USER_ID)
                    .table(RmaRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RmaRequest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RmaRequest {
    Table,
    Id,
    OrderItemId,
    UserId,
    Kind,
    Status,
    Reason,
    CreatedAt,
    UpdatedAt,
}
