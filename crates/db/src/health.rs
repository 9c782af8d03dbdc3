//! Store round-trip probe.

use tally_core::query::{QueryBuilder, SqlStatement, SqlValue};

use crate::store::{Store, StoreError};

const CREATE_SQL: &str = "CREATE TABLE IF NOT EXISTS health_check (value TEXT);";

/// Writes the current epoch-millisecond timestamp to `health_check` and
/// returns it. The table is created on first use.
///
/// # Errors
///
/// Returns an error if either statement fails.
pub async fn check(store: &dyn Store) -> Result<String, StoreError> {
    let now = chrono::Utc::now().timestamp_millis().to_string();

    store.execute(SqlStatement::new(CREATE_SQL, Vec::new())).await?;
    let insert = QueryBuilder::new("health_check", "value", store.placeholder_style())
        .insert(vec![("value", SqlValue::Text(now.clone()))])?;
    store.execute(insert).await?;

    Ok(now)
}
