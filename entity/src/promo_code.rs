use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "promo_code")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub percent_off: i32,
    pub active: bool,
    pub expires_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::promo_redemption::Entity")]
    PromoRedemption,
}

impl Related<super::promo_redemption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PromoRedemption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
