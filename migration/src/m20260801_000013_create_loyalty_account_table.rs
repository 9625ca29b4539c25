use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000001_create_shop_user_table::ShopUser;

static FK_LOYALTY_ACCOUNT_USER_ID: &str = "fk_loyalty_account_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoyaltyAccount::Table)
                    .if_not_exists()
                    .col(pk_uuid(LoyaltyAccount::Id))
                    .col(uuid_uniq(LoyaltyAccount::UserId))
                    .col(big_integer(LoyaltyAccount::PointsBalance))
                    .col(timestamp(LoyaltyAccount::CreatedAt))
                    .col(timestamp(LoyaltyAccount::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LOYALTY_ACCOUNT_USER_ID)
                    .from_tbl(LoyaltyAccount::Table)
                    .from_col(LoyaltyAccount::UserId)
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
                    .name(FK_LOYALTY_ACCOUNT_USER_ID)
                    .table(LoyaltyAccount::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LoyaltyAccount::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LoyaltyAccount {
    Table,
    Id,
    UserId,
    PointsBalance,
    CreatedAt,
    UpdatedAt,
}
