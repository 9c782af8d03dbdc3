//! Project budget repository.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, QueryResult};
use serde::Serialize;
use tally_core::budget::{IDENTITY, TABLE};
use tally_core::currency::BaseAmount;
use tally_core::query::{QueryBuilder, SqlValue};
use tracing::debug;

use crate::store::{QueryOutput, Store, StoreError};

/// A stored project budget, serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBudget {
    /// Identity.
    pub project_id: i64,
    /// Project name.
    pub project_name: String,
    /// Budget year.
    pub year: i64,
    /// Local currency code.
    pub currency: String,
    /// Initial budget in the local currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_budget_local: Decimal,
    /// Budget in USD.
    #[serde(with = "rust_decimal::serde::float")]
    pub budget_usd: Decimal,
    /// Initial schedule estimate, in months.
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_schedule_estimate_months: Decimal,
    /// Adjusted schedule estimate, in months.
    #[serde(with = "rust_decimal::serde::float")]
    pub adjusted_schedule_estimate_months: Decimal,
    /// Contingency rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub contingency_rate: Decimal,
    /// Escalation rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub escalation_rate: Decimal,
    /// Final budget in USD.
    #[serde(with = "rust_decimal::serde::float")]
    pub final_budget_usd: Decimal,
}

impl BaseAmount for ProjectBudget {
    fn base_amount(&self) -> Decimal {
        self.final_budget_usd
    }
}

/// Repository for project budget rows.
#[derive(Clone)]
pub struct ProjectBudgetRepository {
    store: Arc<dyn Store>,
}

impl ProjectBudgetRepository {
    /// Creates a new repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn builder(&self) -> QueryBuilder<'static> {
        QueryBuilder::new(TABLE, IDENTITY.column, self.store.placeholder_style())
    }

    /// Finds a budget by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ProjectBudget>, StoreError> {
        let stmt = self.builder().select_by_id(SqlValue::Int(id))?;
        let rows = self.store.fetch_all(stmt).await?;
        Ok(decode(&rows)?.into_iter().next())
    }

    /// Finds every budget for `year` named `project_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_year_and_name(
        &self,
        year: i64,
        project_name: &str,
    ) -> Result<Vec<ProjectBudget>, StoreError> {
        let stmt = self.builder().select_where(vec![
            ("year", SqlValue::Int(year)),
            ("project_name", SqlValue::from(project_name)),
        ])?;
        let rows = self.store.fetch_all(stmt).await?;
        decode(&rows)
    }

    /// Finds every budget whose name is in `names`. An empty list matches
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_names(&self, names: &[String]) -> Result<Vec<ProjectBudget>, StoreError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let values = names.iter().cloned().map(SqlValue::Text).collect();
        let stmt = self.builder().select_in("project_name", values)?;
        let rows = self.store.fetch_all(stmt).await?;
        decode(&rows)
    }

    /// Inserts a budget from `(column, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the identity is taken.
    pub async fn insert(&self, columns: Vec<(&'static str, SqlValue)>) -> Result<(), StoreError> {
        let stmt = self.builder().insert(columns)?;
        let outcome = self.store.execute(stmt).await?;
        debug!(rows_affected = outcome.rows_affected, "Inserted project budget");
        Ok(())
    }

    /// Replaces every non-identity column of budget `id`. Returns the number
    /// of rows changed, which is zero when `id` does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn update(
        &self,
        id: i64,
        columns: Vec<(&'static str, SqlValue)>,
    ) -> Result<u64, StoreError> {
        let stmt = self.builder().update(columns, SqlValue::Int(id))?;
        let outcome = self.store.execute(stmt).await?;
        debug!(project_id = id, rows_affected = outcome.rows_affected, "Updated project budget");
        Ok(outcome.rows_affected)
    }

    /// Deletes budget `id`. Deleting a missing budget is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let stmt = self.builder().delete_by_id(SqlValue::Int(id))?;
        match self.store.run(stmt).await? {
            QueryOutput::Executed(outcome) => {
                debug!(project_id = id, rows_affected = outcome.rows_affected, "Deleted project budget");
            }
            QueryOutput::Rows(_) => debug!(project_id = id, "Deleted project budget"),
        }
        Ok(())
    }
}

fn decode(rows: &[QueryResult]) -> Result<Vec<ProjectBudget>, StoreError> {
    rows.iter()
        .map(|row| ProjectBudget::from_query_result(row, "").map_err(StoreError::from))
        .collect()
}
