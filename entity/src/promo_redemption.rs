use sea_orm::entity::prelude::*;

/// One row per promo use; the (promo_code_id, user_id) unique index is what
/// prevents a user redeeming the same code twice.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "promo_redemption")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub promo_code_id: Uuid,
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub redeemed_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::promo_code::Entity",
        from = "Column::PromoCodeId",
        to = "super::promo_code::Column::Id"
    )]
    PromoCode,
    #[sea_orm(
        belongs_to = "super::shop_user::Entity",
        from = "Column::UserId",
        to = "super::shop_user::Column::Id"
    )]
    ShopUser,
}

impl Related<super::promo_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PromoCode.def()
    }
}

impl Related<super::shop_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShopUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
