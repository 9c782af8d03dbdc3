//! In-memory SQLite store.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, QueryResult};
use sea_orm_migration::MigratorTrait;
use tally_core::query::{PlaceholderStyle, SqlStatement};
use tracing::info;

use super::{ExecOutcome, Store, StoreError, execute_statement, fetch_rows};
use crate::migration::Migrator;

const URL: &str = "sqlite::memory:";

/// Keeps the single pooled connection open for the life of the process.
const KEEP_ALIVE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 100);

/// Ephemeral SQLite database, created and migrated on connect.
///
/// The pool holds exactly one connection because every in-memory
/// connection opens its own empty database.
#[derive(Debug, Clone)]
pub struct EmbeddedStore {
    db: DatabaseConnection,
}

impl EmbeddedStore {
    /// Opens a fresh in-memory database and applies all migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn connect() -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(URL);
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(KEEP_ALIVE)
            .max_lifetime(KEEP_ALIVE)
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        Migrator::up(&db, None).await?;
        info!("Embedded store ready");

        Ok(Self { db })
    }
}

#[async_trait]
impl Store for EmbeddedStore {
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::QuestionMark
    }

    fn read_keywords(&self) -> &'static [&'static str] {
        &["SELECT", "DELETE"]
    }

    async fn fetch_all(&self, stmt: SqlStatement) -> Result<Vec<QueryResult>, StoreError> {
        fetch_rows(&self.db, stmt).await
    }

    async fn execute(&self, stmt: SqlStatement) -> Result<ExecOutcome, StoreError> {
        execute_statement(&self.db, stmt).await
    }
}
