use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::model::status::{RmaKind, RmaStatus};

pub struct RmaRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RmaRepository<'a> {
    /// Creates a new instance of [`RmaRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        order_item_id: Uuid,
        user_id: Uuid,
        kind: RmaKind,
        reason: String,
    ) -> Result<entity::rma_request::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let rma = entity::rma_request::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            order_item_id: ActiveValue::Set(order_item_id),
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            status: ActiveValue::Set(RmaStatus::Requested.as_str().to_string()),
            reason: ActiveValue::Set(reason),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        rma.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        rma_id: Uuid,
    ) -> Result<Option<entity::rma_request::Model>, DbErr> {
        entity::prelude::RmaRequest::find_by_id(rma_id)
            .one(self.db)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<entity::rma_request::Model>, DbErr> {
        entity::prelude::RmaRequest::find()
            .filter(entity::rma_request::Column::UserId.eq(user_id))
            .order_by_desc(entity::rma_request::Column::UpdatedAt)
            .all(self.db)
            .await
    }

    pub async fn list_by_status(
        &self,
        status: RmaStatus,
    ) -> Result<Vec<entity::rma_request::Model>, DbErr> {
        entity::prelude::RmaRequest::find()
            .filter(entity::rma_request::Column::Status.eq(status.as_str()))
            .order_by_desc(entity::rma_request::Column::UpdatedAt)
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        rma: entity::rma_request::Model,
        status: RmaStatus,
    ) -> Result<entity::rma_request::Model, DbErr> {
        let mut rma: entity::rma_request::ActiveModel = rma.into();
        rma.status = ActiveValue::Set(status.as_str().to_string());
        rma.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        rma.update(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use uuid::Uuid;

    use crate::{
        data::care::rma::RmaRepository,
        model::status::{RmaKind, RmaStatus},
    };

    /// Expect new RMA requests to start in the requested status
    #[tokio::test]
    async fn creates_requested_rma() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!(entity::prelude::RmaRequest)?;
        let user = test.users().insert_user(1).await?;
        let (_, item) = test.orders().insert_order_with_item(user.id, "delivered").await?;

        let rma_repo = RmaRepository::new(&test.state.db);
        let rma = rma_repo
            .create(
                item.id,
                user.id,
                RmaKind::Return,
                "Too small".to_string(),
            )
            .await?;

        assert_eq!(rma.status, "requested");
        assert_eq!(rma.kind, "return");

        Ok(())
    }

    /// Expect status listing to filter to the requested status
    #[tokio::test]
    async fn lists_by_status() -> Result<(), TestError> {
        let mut test = test_setup_with_order_tables!(entity::prelude::RmaRequest)?;
        let user = test.users().insert_user(1).await?;
        let (_, item) = test.orders().insert_order_with_item(user.id, "delivered").await?;

        let rma_repo = RmaRepository::new(&test.state.db);
        let rma = rma_repo
            .create(item.id, user.id, RmaKind::Return, "Too small".to_string())
            .await?;
        rma_repo.update_status(rma, RmaStatus::Approved).await?;

        let requested = rma_repo.list_by_status(RmaStatus::Requested).await?;
        assert!(requested.is_empty());

        let approved = rma_repo.list_by_status(RmaStatus::Approved).await?;
        assert_eq!(approved.len(), 1);

        Ok(())
    }

    /// Expect None for an RMA ID that does not exist
    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown() -> Result<(), TestError> {
        let test = test_setup_with_order_tables!(entity::prelude::RmaRequest)?;

        let rma_repo = RmaRepository::new(&test.state.db);
        let result = rma_repo.get_by_id(Uuid::new_v4()).await?;

        assert!(result.is_none());

        Ok(())
    }
}
