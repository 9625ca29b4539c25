use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000001_create_shop_user_table::ShopUser,
    m20260801_000002_create_product_table::Product,
};

static FK_REVIEW_PRODUCT_ID: &str = "fk_product_review_product_id";
static FK_REVIEW_USER_ID: &str = "fk_product_review_user_id";
static IDX_REVIEW_PRODUCT_USER: &str = "idx_product_review_product_user";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductReview::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProductReview::Id))
                    .col(uuid(ProductReview::ProductId))
                    .col(uuid(ProductReview::UserId))
                    .col(integer(ProductReview::Rating))
                    .col(text_null(ProductReview::Body))
                    .col(boolean(ProductReview::Published))
                    .col(timestamp(ProductReview::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REVIEW_PRODUCT_ID)
                    .from_tbl(ProductReview::Table)
                    .from_col(ProductReview::ProductId)
                    .to_tbl(Product::Table)
                    .to_col(Product::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REVIEW_USER_ID)
                    .from_tbl(ProductReview::Table)
                    .from_col(ProductReview::UserId)
                    .to_tbl(ShopUser::Table)
                    .to_col(ShopUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REVIEW_PRODUCT_USER)
                    .table(ProductReview::Table)
                    .col(ProductReview::ProductId)
                    .col(ProductReview::UserId)
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
                    .name(FK_REVIEW_PRODUCT_ID)
                    .table(ProductReview::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REVIEW_USER_ID)
                    .table(ProductReview::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ProductReview::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ProductReview {
    Table,
    Id,
    ProductId,
    UserId,
    Rating,
    Body,
    Published,
    CreatedAt,
}
