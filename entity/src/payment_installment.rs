use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_installment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub sequence: i32,
    pub amount: Decimal,
    pub due_date: DateTime,
    pub status: String,
    pub paid_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payment_plan::Entity",
        from = "Column::PlanId",
        to = "super::payment_plan::Column::Id"
    )]
    PaymentPlan,
}

impl Related<super::payment_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
