use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

pub struct PromoRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PromoRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        code: String,
        percent_off: i32,
        expires_at: Option<NaiveDateTime>,
    ) -> Result<entity::promo_code::Model, DbErr> {
        let promo = entity::promo_code::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            code: ActiveValue::Set(code),
            percent_off: ActiveValue::Set(percent_off),
            active: ActiveValue::Set(true),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        promo.insert(self.db).await
    }

    pub async fn get_by_code(
        &self,
        code: &str,
    ) -> Result<Option<entity::promo_code::Model>, DbErr> {
        entity::prelude::PromoCode::find()
            .filter(entity::promo_code::Column::Code.eq(code))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::promo_code::Model>, DbErr> {
        entity::prelude::PromoCode::find()
            .order_by_desc(entity::promo_code::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Records a redemption; the (promo, user) unique index makes a second
    /// redemption by the same user fail with a database error.
    pub async fn record_redemption(
        &self,
        promo_code_id: Uuid,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<entity::promo_redemption::Model, DbErr> {
        let redemption = entity::promo_redemption::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            promo_code_id: ActiveValue::Set(promo_code_id),
            user_id: ActiveValue::Set(user_id),
            order_id: ActiveValue::Set(order_id),
            redeemed_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        redemption.insert(self.db).await
    }

    pub async fn has_redeemed(&self, promo_code_id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let redemption = entity::prelude::PromoRedemption::find()
            .filter(entity::promo_redemption::Column::PromoCodeId.eq(promo_code_id))
            .filter(entity::promo_redemption::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(redemption.is_some())
    }
}
