use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SalesDaily::Table)
                    .if_not_exists()
                    .col(pk_uuid(SalesDaily::Id))
                    .col(date_uniq(SalesDaily::Day))
                    .col(big_integer(SalesDaily::OrderCount))
                    .col(big_integer(SalesDaily::UnitsSold))
                    .col(decimal_len(SalesDaily::Revenue, 12, 2))
                    .col(timestamp(SalesDaily::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SalesDaily::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SalesDaily {
    Table,
    Id,
    Day,
    OrderCount,
    UnitsSold,
    Revenue,
    UpdatedAt,
}
