use sea_orm::entity::prelude::*;

/// Order line with the variant details snapshotted at checkout, so later
/// catalog edits do not rewrite order history.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub variant_id: Uuid,
    pub sku: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer_order::Entity",
        from = "Column::OrderId",
        to = "super::customer_order::Column::Id"
    )]
    CustomerOrder,
    #[sea_orm(has_many = "super::rma_request::Entity")]
    RmaRequest,
}

impl Related<super::customer_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerOrder.def()
    }
}

impl Related<super::rma_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RmaRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
