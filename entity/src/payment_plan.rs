use sea_orm::entity::prelude::*;

/// Buy-now-pay-later plan splitting an order total into equal installments.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_plan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_id: Uuid,
    pub installment_count: i32,
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer_order::Entity",
        from = "Column::OrderId",
        to = "super::customer_order::Column::Id"
    )]
    CustomerOrder,
    #[sea_orm(has_many = "super::payment_installment::Entity")]
    PaymentInstallment,
}

impl Related<super::customer_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerOrder.def()
    }
}

impl Related<super::payment_installment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentInstallment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
