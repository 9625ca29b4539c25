use chrono::{NaiveDateTime, Utc};
use migration::Expr;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::model::status::{InstallmentStatus, PaymentStatus, PlanStatus};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a payment row.
    pub async fn create(
        &self,
        order_id: Uuid,
        installment_id: Option<Uuid>,
        amount: Decimal,
        currency: String,
        status: PaymentStatus,
        gateway_reference: Option<String>,
    ) -> Result<entity::payment::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let payment = entity::payment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            order_id: ActiveValue::Set(order_id),
            installment_id: ActiveValue::Set(installment_id),
            amount: ActiveValue::Set(amount),
            currency: ActiveValue::Set(currency),
            status: ActiveValue::Set(status.as_str().to_string()),
            gateway_reference: ActiveValue::Set(gateway_reference),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        payment.insert(self.db).await
    }

    /// The captured full-order payment, if any. Installment payments carry an
    /// installment_id and are excluded.
    pub async fn get_captured_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::OrderId.eq(order_id))
            .filter(entity::payment::Column::InstallmentId.is_null())
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Captured.as_str()))
            .one(self.db)
            .await
    }

    pub async fn list_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::OrderId.eq(order_id))
            .order_by_asc(entity::payment::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        payment: entity::payment::Model,
        status: PaymentStatus,
    ) -> Result<entity::payment::Model, DbErr> {
        let mut payment: entity::payment::ActiveModel = payment.into();
        payment.status = ActiveValue::Set(status.as_str().to_string());
        payment.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        payment.update(self.db).await
    }

    /// Creates a BNPL plan row.
    pub async fn create_plan(
        &self,
        order_id: Uuid,
        installment_count: i32,
    ) -> Result<entity::payment_plan::Model, DbErr> {
        let plan = entity::payment_plan::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            order_id: ActiveValue::Set(order_id),
            installment_count: ActiveValue::Set(installment_count),
            status: ActiveValue::Set(PlanStatus::Active.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        plan.insert(self.db).await
    }

    pub async fn get_plan_by_order(
        &self,
        order_id: Uuid,
    ) -> Result<Option<entity::payment_plan::Model>, DbErr> {
        entity::prelude::PaymentPlan::find()
            .filter(entity::payment_plan::Column::OrderId.eq(order_id))
            .one(self.db)
            .await
    }

    pub async fn get_plan(
        &self,
        plan_id: Uuid,
    ) -> Result<Option<entity::payment_plan::Model>, DbErr> {
        entity::prelude::PaymentPlan::find_by_id(plan_id)
            .one(self.db)
            .await
    }

    pub async fn update_plan_status(
        &self,
        plan: entity::payment_plan::Model,
        status: PlanStatus,
    ) -> Result<entity::payment_plan::Model, DbErr> {
        let mut plan: entity::payment_plan::ActiveModel = plan.into();
        plan.status = ActiveValue::Set(status.as_str().to_string());

        plan.update(self.db).await
    }

    /// Inserts the plan's installments; `schedule` pairs each amount with its
    /// due date, in sequence order.
    pub async fn create_installments(
        &self,
        plan_id: Uuid,
        schedule: Vec<(Decimal, NaiveDateTime)>,
    ) -> Result<Vec<entity::payment_installment::Model>, DbErr> {
        let models =
            schedule
                .into_iter()
                .enumerate()
                .map(|(index, (amount, due_date))| {
                    entity::payment_installment::ActiveModel {
                        id: ActiveValue::Set(Uuid::new_v4()),
                        plan_id: ActiveValue::Set(plan_id),
                        sequence: ActiveValue::Set(index as i32 + 1),
                        amount: ActiveValue::Set(amount),
                        due_date: ActiveValue::Set(due_date),
                        status: ActiveValue::Set(
                            InstallmentStatus::Scheduled.as_str().to_string(),
                        ),
                        paid_at: ActiveValue::Set(None),
                    }
                });

        entity::prelude::PaymentInstallment::insert_many(models)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_installments(
        &self,
        plan_id: Uuid,
    ) -> Result<Vec<entity::payment_installment::Model>, DbErr> {
        entity::prelude::PaymentInstallment::find()
            .filter(entity::payment_installment::Column::PlanId.eq(plan_id))
            .order_by_asc(entity::payment_installment::Column::Sequence)
            .all(self.db)
            .await
    }

    pub async fn get_installment(
        &self,
        installment_id: Uuid,
    ) -> Result<Option<entity::payment_installment::Model>, DbErr> {
        entity::prelude::PaymentInstallment::find_by_id(installment_id)
            .one(self.db)
            .await
    }

    pub async fn update_installment_status(
        &self,
        installment: entity::payment_installment::Model,
        status: InstallmentStatus,
    ) -> Result<entity::payment_installment::Model, DbErr> {
        let mut installment: entity::payment_installment::ActiveModel = installment.into();

        if matches!(status, InstallmentStatus::Paid) {
            installment.paid_at = ActiveValue::Set(Some(Utc::now().naive_utc()));
        }

        installment.status = ActiveValue::Set(status.as_str().to_string());

        installment.update(self.db).await
    }

    /// Flips scheduled installments past their due date to overdue; returns
    /// the number of rows affected.
    pub async fn mark_overdue(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::PaymentInstallment::update_many()
            .col_expr(
                entity::payment_installment::Column::Status,
                Expr::value(InstallmentStatus::Overdue.as_str()),
            )
            .filter(
                entity::payment_installment::Column::Status
                    .eq(InstallmentStatus::Scheduled.as_str()),
            )
            .filter(entity::payment_installment::Column::DueDate.lt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Number of installments on the plan still awaiting payment.
    pub async fn count_outstanding(&self, plan_id: Uuid) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::PaymentInstallment::find()
            .filter(entity::payment_installment::Column::PlanId.eq(plan_id))
            .filter(
                entity::payment_installment::Column::Status
                    .ne(InstallmentStatus::Paid.as_str()),
            )
            .count(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::{
        data::payment::PaymentRepository,
        model::status::{InstallmentStatus, PaymentStatus},
    };

    /// Expect captured lookup to ignore installment payments
    #[tokio::test]
    async fn captured_lookup_ignores_installment_payments() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(9000, 2))
            .await?;

        let payment_repo = PaymentRepository::new(&test.state.db);
        let plan = payment_repo.create_plan(order.id, 3).await?;
        let due = Utc::now().naive_utc() + Duration::days(30);
        let installments = payment_repo
            .create_installments(plan.id, vec![(Decimal::new(3000, 2), due)])
            .await?;

        // Captured installment payment present, but no full-order capture
        payment_repo
            .create(
                order.id,
                Some(installments[0].id),
                Decimal::new(3000, 2),
                "USD".to_string(),
                PaymentStatus::Captured,
                Some("txn_1".to_string()),
            )
            .await?;

        let captured = payment_repo.get_captured_for_order(order.id).await?;
        assert!(captured.is_none());

        payment_repo
            .create(
                order.id,
                None,
                Decimal::new(9000, 2),
                "USD".to_string(),
                PaymentStatus::Captured,
                Some("txn_2".to_string()),
            )
            .await?;

        let captured = payment_repo.get_captured_for_order(order.id).await?;
        assert!(captured.is_some());

        Ok(())
    }

    /// Expect the overdue sweep to flip only past-due scheduled installments
    #[tokio::test]
    async fn mark_overdue_flips_past_due_only() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(9000, 2))
            .await?;

        let payment_repo = PaymentRepository::new(&test.state.db);
        let plan = payment_repo.create_plan(order.id, 2).await?;

        let now = Utc::now().naive_utc();
        payment_repo
            .create_installments(
                plan.id,
                vec![
                    (Decimal::new(4500, 2), now - Duration::days(3)),
                    (Decimal::new(4500, 2), now + Duration::days(27)),
                ],
            )
            .await?;

        let flipped = payment_repo.mark_overdue(now).await?;
        assert_eq!(flipped, 1);

        let installments = payment_repo.get_installments(plan.id).await?;
        assert_eq!(installments[0].status, "overdue");
        assert_eq!(installments[1].status, "scheduled");

        Ok(())
    }

    /// Expect outstanding count to drop as installments are paid
    #[tokio::test]
    async fn counts_outstanding_installments() -> Result<(), TestError> {
        let mut test = test_setup_with_payment_tables!()?;
        let user = test.users().insert_user(1).await?;
        let order = test
            .orders()
            .insert_order(user.id, "pending", Decimal::new(9000, 2))
            .await?;

        let payment_repo = PaymentRepository::new(&test.state.db);
        let plan = payment_repo.create_plan(order.id, 2).await?;
        let due = Utc::now().naive_utc() + Duration::days(30);
        let installments = payment_repo
            .create_installments(
                plan.id,
                vec![(Decimal::new(4500, 2), due), (Decimal::new(4500, 2), due)],
            )
            .await?;

        assert_eq!(payment_repo.count_outstanding(plan.id).await?, 2);

        payment_repo
            .update_installment_status(installments[0].clone(), InstallmentStatus::Paid)
            .await?;

        assert_eq!(payment_repo.count_outstanding(plan.id).await?, 1);

        Ok(())
    }

    /// Expect None for an installment ID that does not exist
    #[tokio::test]
    async fn get_installment_returns_none_for_unknown() -> Result<(), TestError> {
        let test = test_setup_with_payment_tables!()?;

        let payment_repo = PaymentRepository::new(&test.state.db);
        let result = payment_repo.get_installment(Uuid::new_v4()).await?;

        assert!(result.is_none());

        Ok(())
    }
}
