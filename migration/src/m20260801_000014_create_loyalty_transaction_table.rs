use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000013_create_loyalty_account_table::LoyaltyAccount;

static FK_LOYALTY_TX_ACCOUNT_ID: &str = "fk_loyalty_transaction_account_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoyaltyTransaction::Table)
                    .if_not_exists()
                    .col(pk_uuid(LoyaltyTransaction::Id))
                    .col(uuid(LoyaltyTransaction::AccountId))
                    .col(big_integer(LoyaltyTransaction::Delta))
                    .col(string(LoyaltyTransaction::Reason))
                    .col(uuid_null(LoyaltyTransaction::OrderId))
                    .col(timestamp(LoyaltyTransaction::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LOYALTY_TX_ACCOUNT_ID)
                    .from_tbl(LoyaltyTransaction::Table)
                    .from_col(LoyaltyTransaction::AccountId)
                    .to_tbl(LoyaltyAccount::Table)
                    .to_col(LoyaltyAccount::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LOYALTY_TX_ACCOUNT_ID)
                    .table(LoyaltyTransaction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LoyaltyTransaction::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LoyaltyTransaction {
    Table,
    Id,
    AccountId,
    Delta,
    Reason,
    OrderId,
    CreatedAt,
}
