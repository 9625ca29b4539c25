use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000007_create_customer_order_table::CustomerOrder,
    m20260801_000010_create_payment_installment_table::PaymentInstallment,
};

static FK_PAYMENT_ORDER_ID: &str = "fk_payment_order_id";
static FK_PAYMENT_INSTALLMENT_ID: &str = "fk_payment_installment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_uuid(Payment::Id))
                    .col(uuid(Payment::OrderId))
                    .col(uuid_null(Payment::InstallmentId))
                    .col(decimal_len(Payment::Amount, 10, 2))
                    .col(string(Payment::Currency))
                    .col(string(Payment::Status))
                    .col(string_null(Payment::GatewayReference))
                    .col(timestamp(Payment::CreatedAt))
                    .col(timestamp(Payment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_ORDER_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::OrderId)
                    .to_tbl(CustomerOrder::Table)
                    .to_col(CustomerOrder::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_INSTALLMENT_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::InstallmentId)
                    .to_tbl(PaymentInstallment::Table)
                    .to_col(PaymentInstallment::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_ORDER_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_INSTALLMENT_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    OrderId,
    InstallmentId,
    Amount,
    Currency,
    Status,
    GatewayReference,
    CreatedAt,
    UpdatedAt,
}
