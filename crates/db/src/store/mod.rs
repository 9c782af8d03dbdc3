//! Store abstraction over the embedded and networked databases.
//!
//! Both stores accept the same [`SqlStatement`]s. They differ only in
//! placeholder style and in which statements are answered with rows.

mod embedded;
mod networked;

pub use embedded::EmbeddedStore;
pub use networked::NetworkedStore;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, SqlErr, Statement, Value};
use tally_core::query::{PlaceholderStyle, QueryError, SqlStatement, SqlValue};
use thiserror::Error;

/// Errors raised by a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique or primary key constraint rejected the write.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The statement could not be built.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::DuplicateKey(detail),
            _ => Self::Database(err),
        }
    }
}

/// Result of a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Rows inserted, updated or deleted.
    pub rows_affected: u64,
}

/// What a statement produced.
pub enum QueryOutput {
    /// Rows returned by a read.
    Rows(Vec<QueryResult>),
    /// Outcome of a write.
    Executed(ExecOutcome),
}

/// A database that runs parameterized statements.
#[async_trait]
pub trait Store: Send + Sync {
    /// Placeholder syntax this store expects.
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Leading keywords of statements routed to [`Store::fetch_all`] by
    /// [`Store::run`].
    fn read_keywords(&self) -> &'static [&'static str] {
        &["SELECT"]
    }

    /// Runs a statement and returns every row it produced.
    async fn fetch_all(&self, stmt: SqlStatement) -> Result<Vec<QueryResult>, StoreError>;

    /// Runs a statement and returns the affected row count.
    async fn execute(&self, stmt: SqlStatement) -> Result<ExecOutcome, StoreError>;

    /// Runs a statement, choosing the call by its leading keyword.
    async fn run(&self, stmt: SqlStatement) -> Result<QueryOutput, StoreError> {
        if stmt.starts_with_any(self.read_keywords()) {
            self.fetch_all(stmt).await.map(QueryOutput::Rows)
        } else {
            self.execute(stmt).await.map(QueryOutput::Executed)
        }
    }
}

fn to_value(value: SqlValue) -> Value {
    match value {
        SqlValue::Int(v) => Value::from(v),
        SqlValue::Decimal(v) => Value::from(v),
        SqlValue::Text(v) => Value::from(v),
    }
}

fn to_statement(db: &DatabaseConnection, stmt: SqlStatement) -> Statement {
    let values: Vec<Value> = stmt.params.into_iter().map(to_value).collect();
    Statement::from_sql_and_values(db.get_database_backend(), stmt.sql, values)
}

async fn fetch_rows(
    db: &DatabaseConnection,
    stmt: SqlStatement,
) -> Result<Vec<QueryResult>, StoreError> {
    let statement = to_statement(db, stmt);
    Ok(db.query_all(statement).await?)
}

async fn execute_statement(
    db: &DatabaseConnection,
    stmt: SqlStatement,
) -> Result<ExecOutcome, StoreError> {
    let statement = to_statement(db, stmt);
    let result = db.execute(statement).await?;
    Ok(ExecOutcome {
        rows_affected: result.rows_affected(),
    })
}
