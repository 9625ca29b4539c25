use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000001_create_shop_user_table::ShopUser,
    m20260801_000006_create_promo_code_table::PromoCode,
};

static FK_ORDER_USER_ID: &str = "fk_customer_order_user_id";
static FK_ORDER_PROMO_CODE_ID: &str = "fk_customer_order_promo_code_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerOrder::Table)
                    .if_not_exists()
                    .col(pk_uuid(CustomerOrder::Id))
                    .col(uuid(CustomerOrder::UserId))
                    .col(string(CustomerOrder::Status))
                    .col(decimal_len(CustomerOrder::Subtotal, 10, 2))
                    .col(decimal_len(CustomerOrder::Discount, 10, 2))
                    .col(decimal_len(CustomerOrder::Total, 10, 2))
                    .col(string(CustomerOrder::Currency))
                    .col(uuid_null(CustomerOrder::PromoCodeId))
                    .col(string(CustomerOrder::ShipToName))
                    .col(string(CustomerOrder::ShipToAddress))
                    .col(timestamp(CustomerOrder::PlacedAt))
                    .col(timestamp_null(CustomerOrder::ShippedAt))
                    .col(timestamp_null(CustomerOrder::DeliveredAt))
                    .col(timestamp_null(CustomerOrder::CancelledAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ORDER_USER_ID)
                    .from_tbl(CustomerOrder::Table)
                    .from_col(CustomerOrder::UserId)
                    .to_tbl(ShopUser::Table)
                    .to_col(ShopUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ORDER_PROMO_CODE_ID)
                    .from_tbl(CustomerOrder::Table)
                    .from_col(CustomerOrder::PromoCodeId)
                    .to_tbl(PromoCode::Table)
                    .to_col(PromoCode::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ORDER_USER_ID)
                    .table(CustomerOrder::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ORDER_PROMO_CODE_ID)
                    .table(CustomerOrder::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CustomerOrder::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CustomerOrder {
    Table,
    Id,
    UserId,
    Status,
    Subtotal,
    Discount,
    Total,
    Currency,
    PromoCodeId,
    ShipToName,
    ShipToAddress,
    PlacedAt,
    ShippedAt,
    DeliveredAt,
    CancelledAt,
}
