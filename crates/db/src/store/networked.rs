//! PostgreSQL store.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, QueryResult};
use tally_core::query::{PlaceholderStyle, SqlStatement};
use tally_shared::DatabaseConfig;
use tracing::info;

use super::{ExecOutcome, Store, StoreError, execute_statement, fetch_rows};

/// Pooled PostgreSQL connection. The schema is managed by the migrator.
#[derive(Debug, Clone)]
pub struct NetworkedStore {
    db: DatabaseConnection,
}

impl NetworkedStore {
    /// Connects to `url` using the pool sizes from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(url);
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        info!(
            max_connections = config.max_connections,
            "Networked store connected"
        );

        Ok(Self { db })
    }
}

#[async_trait]
impl Store for NetworkedStore {
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Numbered
    }

    async fn fetch_all(&self, stmt: SqlStatement) -> Result<Vec<QueryResult>, StoreError> {
        fetch_rows(&self.db, stmt).await
    }

    async fn execute(&self, stmt: SqlStatement) -> Result<ExecOutcome, StoreError> {
        execute_statement(&self.db, stmt).await
    }
}
