use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000003_create_product_variant_table::ProductVariant,
    m20260801_000004_create_cart_table::Cart,
};

static FK_CART_ITEM_CART_ID: &str = "fk_cart_item_cart_id";
static FK_CART_ITEM_VARIANT_ID: &str = "fk_cart_item_variant_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartItem::Table)
                    .if_not_exists()
                    .col(pk_uuid(CartItem::Id))
                    .col(uuid(CartItem::CartId))
                    .col(uuid(CartItem::VariantId))
                    .col(integer(CartItem::Quantity))
                    .col(decimal_len(CartItem::UnitPrice, 10, 2))
                    .col(timestamp(CartItem::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CART_ITEM_CART_ID)
                    .from_tbl(CartItem::Table)
                    .from_col(CartItem::CartId)
                    .to_tbl(Cart::Table)
                    .to_col(Cart::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CART_ITEM_VARIANT_ID)
                    .from_tbl(CartItem::Table)
                    .from_col(CartItem::VariantId)
                    .to_tbl(ProductVariant::Table)
                    .to_col(ProductVariant::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CART_ITEM_CART_ID)
                    .table(CartItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CART_ITEM_VARIANT_ID)
                    .table(CartItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CartItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CartItem {
    Table,
    Id,
    CartId,
    VariantId,
    Quantity,
    UnitPrice,
    CreatedAt,
}
