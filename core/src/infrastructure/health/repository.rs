use std::time::Instant;

use sea_orm::DatabaseConnection;
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError, health::ports::HealthCheckRepository,
};

#[derive(Debug, Clone)]
pub struct SqliteHealthCheckRepository {
    pub db: DatabaseConnection,
}

impl SqliteHealthCheckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl HealthCheckRepository for SqliteHealthCheckRepository {
    async fn health(&self) -> Result<u64, CoreError> {
        let start = Instant::now();
        self.db.ping().await.map_err(|e| {
            error!("Database ping failed: {}", e);
            CoreError::StorageError(e.to_string())
        })?;

        Ok(start.elapsed().as_millis() as u64)
    }
}
