use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000001_create_shop_user_table::ShopUser,
    m20260801_000006_create_promo_code_table::PromoCode,
    m20260801_000007_create_customer_order_table::CustomerOrder,
};

static FK_REDEMPTION_PROMO_CODE_ID: &str = "fk_promo_redemption_promo_code_id";
static FK_REDEMPTION_USER_ID: &str = "fk_promo_redemption_user_id";
static FK_REDEMPTION_ORDER_ID: &str = "fk_promo_redemption_order_id";
static IDX_REDEMPTION_PROMO_USER: &str = "idx_promo_redemption_promo_user";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PromoRedemption::Table)
                    .if_not_exists()
                    .col(pk_uuid(PromoRedemption::Id))
                    .col(uuid(PromoRedemption::PromoCodeId))
                    .col(uuid(PromoRedemption::UserId))
                    .col(uuid(PromoRedemption::OrderId))
                    .col(timestamp(PromoRedemption::RedeemedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REDEMPTION_PROMO_CODE_ID)
                    .from_tbl(PromoRedemption::Table)
                    .from_col(PromoRedemption::PromoCodeId)
                    .to_tbl(PromoCode::Table)
                    .to_col(PromoCode::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REDEMPTION_USER_ID)
                    .from_tbl(PromoRedemption::Table)
                    .from_col(PromoRedemption::UserId)
                    .to_tbl(ShopUser::Table)
                    .to_col(ShopUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REDEMPTION_ORDER_ID)
                    .from_tbl(PromoRedemption::Table)
                    .from_col(PromoRedemption::OrderId)
                    .to_tbl(CustomerOrder::Table)
                    .to_col(CustomerOrder::Id)
                    .to_owned(),
            )
            .await?;

        // Duplicate promo use per user is rejected here, not in application code
        manager
            .create_index(
                Index::create()
                    .name(IDX_REDEMPTION_PROMO_USER)
                    .table(PromoRedemption::Table)
                    .col(PromoRedemption::PromoCodeId)
                    .col(PromoRedemption::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REDEMPTION_PROMO_CODE_ID)
                    .table(PromoRedemption::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REDEMPTION_USER_ID)
                    .table(PromoRedemption::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REDEMPTION_ORDER_ID)
                    .table(PromoRedemption::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PromoRedemption::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PromoRedemption {
    Table,
    Id,
    PromoCodeId,
    UserId,
    OrderId,
    RedeemedAt,
}
