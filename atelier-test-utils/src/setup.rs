use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    ConnectionTrait, Database, DatabaseConnection,
};
use tower_sessions::{MemoryStore, Session};

use crate::{
    error::TestError,
    fixtures::{catalog::CatalogFixtures, order::OrderFixtures, user::UserFixtures},
};

pub struct TestAppState {
    pub db: DatabaseConnection,
}

pub struct TestSetup {
    /// Mock HTTP server standing in for the payment gateway
    pub server: ServerGuard,
    pub state: TestAppState,
    pub session: Session,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await.unwrap();

        Ok(TestSetup {
            server: mock_server,
            state: TestAppState { db },
            session,
            mocks: Vec::new(),
        })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.state.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Creates composite indexes the entity schema cannot express, e.g. the
    /// promo redemption (promo, user) unique index.
    pub async fn with_indexes(&self, stmts: Vec<IndexCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.state.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// Calls `assert()` on all mocks created through the setup to verify
    /// they were invoked the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }

    /// Fixture helpers for user accounts.
    pub fn users(&mut self) -> UserFixtures<'_> {
        UserFixtures::new(&self.state.db)
    }

    /// Fixture helpers for products and variants.
    pub fn catalog(&mut self) -> CatalogFixtures<'_> {
        CatalogFixtures::new(&self.state.db)
    }

    /// Fixture helpers for orders and order items.
    pub fn orders(&mut self) -> OrderFixtures<'_> {
        OrderFixtures::new(&self.state.db)
    }

    /// Base URL of the mock gateway server.
    pub fn gateway_url(&self) -> String {
        self.server.url()
    }
}

/// Unique (promo_code_id, user_id) index matching the production migration;
/// duplicate redemption tests rely on it.
pub fn promo_redemption_unique_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_promo_redemption_promo_user")
        .table(entity::promo_redemption::Entity)
        .col(entity::promo_redemption::Column::PromoCodeId)
        .col(entity::promo_redemption::Column::UserId)
        .unique()
        .to_owned()
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        $crate::TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

#[macro_export]
macro_rules! test_setup_with_user_tables {
    ($($entity:expr),* $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let mut stmts = vec![
                schema.create_table_from_entity(entity::prelude::ShopUser),
                schema.create_table_from_entity(entity::prelude::Cart),
                schema.create_table_from_entity(entity::prelude::CartItem),
            ];
            $(stmts.push(schema.create_table_from_entity($entity));)*
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

#[macro_export]
macro_rules! test_setup_with_cart_tables {
    ($($entity:expr),* $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let mut stmts = vec![
                schema.create_table_from_entity(entity::prelude::ShopUser),
                schema.create_table_from_entity(entity::prelude::Product),
                schema.create_table_from_entity(entity::prelude::ProductVariant),
                schema.create_table_from_entity(entity::prelude::Cart),
                schema.create_table_from_entity(entity::prelude::CartItem),
            ];
            $(stmts.push(schema.create_table_from_entity($entity));)*
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

#[macro_export]
macro_rules! test_setup_with_order_tables {
    ($($entity:expr),* $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let mut stmts = vec![
                schema.create_table_from_entity(entity::prelude::ShopUser),
                schema.create_table_from_entity(entity::prelude::Product),
                schema.create_table_from_entity(entity::prelude::ProductVariant),
                schema.create_table_from_entity(entity::prelude::Cart),
                schema.create_table_from_entity(entity::prelude::CartItem),
                schema.create_table_from_entity(entity::prelude::PromoCode),
                schema.create_table_from_entity(entity::prelude::CustomerOrder),
                schema.create_table_from_entity(entity::prelude::OrderItem),
                schema.create_table_from_entity(entity::prelude::Payment),
                schema.create_table_from_entity(entity::prelude::PromoRedemption),
                schema.create_table_from_entity(entity::prelude::AnalyticsEvent),
            ];
            $(stmts.push(schema.create_table_from_entity($entity));)*
            setup.with_tables(stmts).await?;
            setup
                .with_indexes(vec![$crate::setup::promo_redemption_unique_index()])
                .await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

#[macro_export]
macro_rules! test_setup_with_payment_tables {
    ($($entity:expr),* $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let mut stmts = vec![
                schema.create_table_from_entity(entity::prelude::ShopUser),
                schema.create_table_from_entity(entity::prelude::Product),
                schema.create_table_from_entity(entity::prelude::ProductVariant),
                schema.create_table_from_entity(entity::prelude::Cart),
                schema.create_table_from_entity(entity::prelude::CartItem),
                schema.create_table_from_entity(entity::prelude::PromoCode),
                schema.create_table_from_entity(entity::prelude::CustomerOrder),
                schema.create_table_from_entity(entity::prelude::OrderItem),
                schema.create_table_from_entity(entity::prelude::PromoRedemption),
                schema.create_table_from_entity(entity::prelude::AnalyticsEvent),
                schema.create_table_from_entity(entity::prelude::PaymentPlan),
                schema.create_table_from_entity(entity::prelude::PaymentInstallment),
                schema.create_table_from_entity(entity::prelude::Payment),
                schema.create_table_from_entity(entity::prelude::LoyaltyAccount),
                schema.create_table_from_entity(entity::prelude::LoyaltyTransaction),
            ];
            $(stmts.push(schema.create_table_from_entity($entity));)*
            setup.with_tables(stmts).await?;
            setup
                .with_indexes(vec![$crate::setup::promo_redemption_unique_index()])
                .await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

#[macro_export]
macro_rules! test_setup_with_care_tables {
    ($($entity:expr),* $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let mut stmts = vec![
                schema.create_table_from_entity(entity::prelude::ShopUser),
                schema.create_table_from_entity(entity::prelude::SupportTicket),
                schema.create_table_from_entity(entity::prelude::TicketMessage),
            ];
            $(stmts.push(schema.create_table_from_entity($entity));)*
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
