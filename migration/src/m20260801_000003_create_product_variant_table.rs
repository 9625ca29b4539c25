use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000002_create_product_table::Product;

static FK_VARIANT_PRODUCT_ID: &str = "fk_product_variant_product_id";
static IDX_VARIANT_PRODUCT_SIZE_COLOR: &str = "idx_product_variant_product_size_color";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductVariant::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProductVariant::Id))
                    .col(uuid(ProductVariant::ProductId))
                    .col(string(ProductVariant::Size))
                    .col(string(ProductVariant::Color))
                    .col(integer(ProductVariant::StockQuantity))
                    .col(timestamp(ProductVariant::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VARIANT_PRODUCT_ID)
                    .from_tbl(ProductVariant::Table)
                    .from_col(ProductVariant::ProductId)
                    .to_tbl(Product::Table)
                    .to_col(Product::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VARIANT_PRODUCT_SIZE_COLOR)
                    .table(ProductVariant::Table)
                    .col(ProductVariant::ProductId)
                    .col(ProductVariant::Size)
                    .col(ProductVariant::Color)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_VARIANT_PRODUCT_ID)
                    .table(ProductVariant::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ProductVariant::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ProductVariant {
    Table,
    Id,
    ProductId,
    Size,
    Color,
    StockQuantity,
    CreatedAt,
}
