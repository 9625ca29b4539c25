use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PromoCode::Table)
                    .if_not_exists()
                    .col(pk_uuid(PromoCode::Id))
                    .col(string_uniq(PromoCode::Code))
                    .col(integer(PromoCode::PercentOff))
                    .col(boolean(PromoCode::Active))
                    .col(timestamp_null(PromoCode::ExpiresAt))
                    .col(timestamp(PromoCode::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromoCode::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PromoCode {
    Table,
    Id,
    Code,
    PercentOff,
    Active,
    ExpiresAt,
    CreatedAt,
}
