use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000007_create_customer_order_table::CustomerOrder;

static FK_PAYMENT_PLAN_ORDER_ID: &str = "fk_payment_plan_order_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentPlan::Table)
                    .if_not_exists()
                    .col(pk_uuid(PaymentPlan::Id))
                    .col(uuid_uniq(PaymentPlan::OrderId))
                    .col(integer(PaymentPlan::InstallmentCount))
                    .col(string(PaymentPlan::Status))
                    .col(timestamp(PaymentPlan::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_PLAN_ORDER_ID)
                    .from_tbl(PaymentPlan::Table)
                    .from_col(PaymentPlan::OrderId)
                    .to_tbl(CustomerOrder::Table)
                    .to_col(CustomerOrder::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_PLAN_ORDER_ID)
                    .table(PaymentPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PaymentPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PaymentPlan {
    Table,
    Id,
    OrderId,
    InstallmentCount,
    Status,
    CreatedAt,
}
