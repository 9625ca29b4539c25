use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PaymentDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub gateway_reference: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::payment::Model> for PaymentDto {
    fn from(payment: entity::payment::Model) -> Self {
        Self {
            id: payment.id,
            order_id: payment.order_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status,
            gateway_reference: payment.gateway_reference,
            created_at: payment.created_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePlanDto {
    /// Number of monthly installments, 2 through 12.
    pub installment_count: i32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PlanDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub installment_count: i32,
    pub status: String,
    pub installments: Vec<InstallmentDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InstallmentDto {
    pub id: Uuid,
    pub sequence: i32,
    pub amount: Decimal,
    pub due_date: NaiveDateTime,
    pub status: String,
    pub paid_at: Option<NaiveDateTime>,
}

impl From<entity::payment_installment::Model> for InstallmentDto {
    fn from(installment: entity::payment_installment::Model) -> Self {
        Self {
            id: installment.id,
            sequence: installment.sequence,
            amount: installment.amount,
            due_date: installment.due_date,
            status: installment.status,
            paid_at: installment.paid_at,
        }
    }
}

impl PlanDto {
    /// Assembles the DTO from a plan row and its installment rows.
    pub fn from_models(
        plan: entity::payment_plan::Model,
        installments: Vec<entity::payment_installment::Model>,
    ) -> Self {
        Self {
            id: plan.id,
            order_id: plan.order_id,
            installment_count: plan.installment_count,
            status: plan.status,
            installments: installments.into_iter().map(InstallmentDto::from).collect(),
        }
    }
}
