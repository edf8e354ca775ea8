use std::{str::FromStr, time::Duration};

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct SqliteConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Connection to the embedded analysis store. Migrations run on open and
/// the database file is created when missing.
#[derive(Clone)]
pub struct Sqlite {
    db: DatabaseConnection,
}

impl Sqlite {
    pub async fn new(config: SqliteConfig) -> Result<Self, anyhow::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        info!(url = %config.url, "sqlite store ready");

        Ok(Self {
            db: SqlxSqliteConnector::from_sqlx_sqlite_pool(pool),
        })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
