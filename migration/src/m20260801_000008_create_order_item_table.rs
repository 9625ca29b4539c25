use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000007_create_customer_order_table::CustomerOrder;

static FK_ORDER_ITEM_ORDER_ID: &str = "fk_order_item_order_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderItem::Table)
                    .if_not_exists()
                    .col(pk_uuid(OrderItem::Id))
                    .col(uuid(OrderItem::OrderId))
                    .col(uuid(OrderItem::VariantId))
                    .col(string(OrderItem::Sku))
                    .col(string(OrderItem::Name))
                    .col(string(OrderItem::Size))
                    .col(string(OrderItem::Color))
                    .col(decimal_len(OrderItem::UnitPrice, 10, 2))
                    .col(integer(OrderItem::Quantity))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ORDER_ITEM_ORDER_ID)
                    .from_tbl(OrderItem::Table)
                    .from_col(OrderItem::OrderId)
                    .to_tbl(CustomerOrder::Table)
                    .to_col(CustomerOrder::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ORDER_ITEM_ORDER_ID)
                    .table(OrderItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OrderItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum OrderItem {
    Table,
    Id,
    OrderId,
    VariantId,
    Sku,
    Name,
    Size,
    Color,
    UnitPrice,
    Quantity,
}
