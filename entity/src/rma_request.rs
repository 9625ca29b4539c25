use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rma_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_item_id: Uuid,
    pub user_id: Uuid,
    /// return, repair, or exchange.
    pub kind: String,
    pub status: String,
    pub reason: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order_item::Entity",
        from = "Column::OrderItemId",
        to = "super::order_item::Column::Id"
    )]
    OrderItem,
    #[sea_orm(
        belongs_to = "super::shop_user::Entity",
        from = "Column::UserId",
        to = "super::shop_user::Column::Id"
    )]
    ShopUser,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl Related<super::shop_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShopUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
