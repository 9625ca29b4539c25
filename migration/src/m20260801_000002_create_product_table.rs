use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_uuid(Product::Id))
                    .col(string_uniq(Product::Sku))
                    .col(string(Product::Name))
                    .col(string_null(Product::Description))
                    .col(string(Product::Category))
                    .col(decimal_len(Product::Price, 10, 2))
                    .col(string(Product::Currency))
                    .col(boolean(Product::Active))
                    .col(timestamp(Product::CreatedAt))
                    .col(timestamp(Product::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Product {
    Table,
    Id,
    Sku,
    Name,
    Description,
    Category,
    Price,
    Currency,
    Active,
    CreatedAt,
    UpdatedAt,
}
