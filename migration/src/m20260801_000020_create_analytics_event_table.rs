use sea_orm_migration::{prelude::*, schema::*};

static IDX_EVENT_KIND_RECORDED_AT: &str = "idx_analytics_event_kind_recorded_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnalyticsEvent::Table)
                    .if_not_exists()
                    .col(pk_uuid(AnalyticsEvent::Id))
                    .col(string(AnalyticsEvent::Kind))
                    .col(uuid_null(AnalyticsEvent::UserId))
                    .col(uuid_null(AnalyticsEvent::ProductId))
                    .col(uuid_null(AnalyticsEvent::OrderId))
                    .col(timestamp(AnalyticsEvent::RecordedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_KIND_RECORDED_AT)
                    .table(AnalyticsEvent::Table)
                    .col(AnalyticsEvent::Kind)
                    .col(AnalyticsEvent::RecordedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnalyticsEvent::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AnalyticsEvent {
    Table,
    Id,
    Kind,
    UserId,
    ProductId,
    OrderId,
    RecordedAt,
}
