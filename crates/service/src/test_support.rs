#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Each test gets its own migrated in-memory database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_memory().await
}
