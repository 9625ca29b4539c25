use sea_orm::DatabaseConnection;

use crate::gateway;

/// Shared state handed to every axum handler.
#[derive(Clone)]
pub struct AppState {
    /// SeaORM database handle.
    pub db: DatabaseConnection,
    /// Payment gateway client.
    pub gateway: gateway::Client,
}

impl From<(DatabaseConnection, gateway::Client)> for AppState {
    fn from((db, gateway): (DatabaseConnection, gateway::Client)) -> Self {
        Self { db, gateway }
    }
}
