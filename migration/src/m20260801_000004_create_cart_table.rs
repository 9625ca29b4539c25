use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000001_create_shop_user_table::ShopUser;

static FK_CART_USER_ID: &str = "fk_cart_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cart::Table)
                    .if_not_exists()
                    .col(pk_uuid(Cart::Id))
                    .col(uuid(Cart::UserId))
                    .col(timestamp(Cart::CreatedAt))
                    .col(timestamp(Cart::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CART_USER_ID)
                    .from_tbl(Cart::Table)
                    .from_col(Cart::UserId)
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
                    .name(FK_CART_USER_ID)
                    .table(Cart::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Cart::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Cart {
    Table,
    Id,
    UserId,
    CreatedAt,
    UpdatedAt,
}
