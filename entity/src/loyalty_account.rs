use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loyalty_account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub points_balance: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shop_user::Entity",
        from = "Column::UserId",
        to = "super::shop_user::Column::Id"
    )]
    ShopUser,
    #[sea_orm(has_many = "super::loyalty_transaction::Entity")]
    LoyaltyTransaction,
}

impl Related<super::shop_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShopUser.def()
    }
}

impl Related<super::loyalty_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoyaltyTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
