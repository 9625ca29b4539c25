use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000009_create_payment_plan_table::PaymentPlan;

static FK_INSTALLMENT_PLAN_ID: &str = "fk_payment_installment_plan_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentInstallment::Table)
                    .if_not_exists()
                    .col(pk_uuid(PaymentInstallment::Id))
                    .col(uuid(PaymentInstallment::PlanId))
                    .col(integer(PaymentInstallment::Sequence))
                    .col(decimal_len(PaymentInstallment::Amount, 10, 2))
                    .col(timestamp(PaymentInstallment::DueDate))
                    .col(string(PaymentInstallment::Status))
                    .col(timestamp_null(PaymentInstallment::PaidAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_INSTALLMENT_PLAN_ID)
                    .from_tbl(PaymentInstallment::Table)
                    .from_col(PaymentInstallment::PlanId)
                    .to_tbl(PaymentPlan::Table)
                    .to_col(PaymentPlan::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_INSTALLMENT_PLAN_ID)
                    .table(PaymentInstallment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PaymentInstallment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PaymentInstallment {
    Table,
    Id,
    PlanId,
    Sequence,
    Amount,
    DueDate,
    Status,
    PaidAt,
}
