use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

pub struct LoyaltyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LoyaltyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns the user's loyalty account, creating an empty one if needed.
    pub async fn get_or_create_account(
        &self,
        user_id: Uuid,
    ) -> Result<entity::loyalty_account::Model, DbErr> {
        let existing = entity::prelude::LoyaltyAccount::find()
            .filter(entity::loyalty_account::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        if let Some(account) = existing {
            return Ok(account);
        }

        let now = Utc::now().naive_utc();

        let account = entity::loyalty_account::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            points_balance: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        account.insert(self.db).await
    }

    /// Applies a signed point delta to the balance and appends the matching
    /// ledger entry. Balance checks belong to the caller.
    pub async fn apply_delta(
        &self,
        account: entity::loyalty_account::Model,
        delta: i64,
        reason: String,
        order_id: Option<Uuid>,
    ) -> Result<
        (
            entity::loyalty_account::Model,
            entity::loyalty_transaction::Model,
        ),
        DbErr,
    > {
        let now = Utc::now().naive_utc();
        let account_id = account.id;
        let new_balance = account.points_balance + delta;

        let mut account: entity::loyalty_account::ActiveModel = account.into();
        account.points_balance = ActiveValue::Set(new_balance);
        account.updated_at = ActiveValue::Set(now);
        let account = account.update(self.db).await?;

        let transaction = entity::loyalty_transaction::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            account_id: ActiveValue::Set(account_id),
            delta: ActiveValue::Set(delta),
            reason: ActiveValue::Set(reason),
            order_id: ActiveValue::Set(order_id),
            created_at: ActiveValue::Set(now),
        };
        let transaction = transaction.insert(self.db).await?;

        Ok((account, transaction))
    }

    pub async fn get_transactions(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<entity::loyalty_transaction::Model>, DbErr> {
        entity::prelude::LoyaltyTransaction::find()
            .filter(entity::loyalty_transaction::Column::AccountId.eq(account_id))
            .order_by_desc(entity::loyalty_transaction::Column::CreatedAt)
            .all(self.db)
            .await
    }
}
