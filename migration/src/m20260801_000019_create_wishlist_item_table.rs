use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000001_create_shop_user_table::ShopUser,
    m20260801_000002_create_product_table::Product,
};

static FK_WISHLIST_USER_ID: &str = "fk_wishlist_item_user_id";
static FK_WISHLIST_PRODUCT_ID: &str = "fk_wishlist_item_product_id";
static IDX_WISHLIST_USER_PRODUCT: &str = "idx_wishlist_item_user_product";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WishlistItem::Table)
                    .if_not_exists()
                    .col(pk_uuid(WishlistItem::Id))
                    .col(uuid(WishlistItem::UserId))
                    .col(uuid(WishlistItem::ProductId))
                    .col(timestamp(WishlistItem::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WISHLIST_USER_ID)
                    .from_tbl(WishlistItem::Table)
                    .from_col(WishlistItem::UserId)
                    .to_tbl(ShopUser::Table)
                    .to_col(ShopUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WISHLIST_PRODUCT_ID)
                    .from_tbl(WishlistItem::Table)
                    .from_col(WishlistItem::ProductId)
                    .to_tbl(Product::Table)
                    .to_col(Product::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WISHLIST_USER_PRODUCT)
                    .table(WishlistItem::Table)
                    .col(WishlistItem::UserId)
                    .col(WishlistItem::ProductId)
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
                    .name(FK_WISHLIST_USER_ID)
                    .table(WishlistItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WISHLIST_PRODUCT_ID)
                    .table(WishlistItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WishlistItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WishlistItem {
    Table,
    Id,
    UserId,
    ProductId,
    CreatedAt,
}
