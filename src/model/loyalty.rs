use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoyaltyAccountDto {
    pub id: Uuid,
    pub points_balance: i64,
}

impl From<entity::loyalty_account::Model> for LoyaltyAccountDto {
    fn from(account: entity::loyalty_account::Model) -> Self {
        Self {
            id: account.id,
            points_balance: account.points_balance,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoyaltyTransactionDto {
    pub id: Uuid,
    pub delta: i64,
    pub reason: String,
    pub order_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

impl From<entity::loyalty_transaction::Model> for LoyaltyTransactionDto {
    fn from(tx: entity::loyalty_transaction::Model) -> Self {
        Self {
            id: tx.id,
            delta: tx.delta,
            reason: tx.reason,
            order_id: tx.order_id,
            created_at: tx.created_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RedeemPointsDto {
    /// Pending order the credit is applied to.
    pub order_id: Uuid,
    /// Points to redeem; 100 points are worth one currency unit.
    pub points: i64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PromoCodeDto {
    pub id: Uuid,
    pub code: String,
    pub percent_off: i32,
    pub active: bool,
    pub expires_at: Option<NaiveDateTime>,
}

impl From<entity::promo_code::Model> for PromoCodeDto {
    fn from(promo: entity::promo_code::Model) -> Self {
        Self {
            id: promo.id,
            code: promo.code,
            percent_off: promo.percent_off,
            active: promo.active,
            expires_at: promo.expires_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePromoDto {
    /// Code string; generated server-side when omitted.
    pub code: Option<String>,
    pub percent_off: i32,
    pub expires_at: Option<NaiveDateTime>,
}
