//! Statement builder for single-table CRUD.

use thiserror::Error;

use super::statement::{PlaceholderStyle, SqlStatement, SqlValue};

/// Errors raised while building a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Table or column name is not a plain SQL identifier.
    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Nothing to insert or set.
    #[error("Statement has no columns")]
    NoColumns,
}

/// Builds parameterized statements against one table.
///
/// Identifiers are checked against `[A-Za-z_][A-Za-z0-9_]*` because they are
/// the only part of a statement written into the SQL text.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    table: &'a str,
    identity_column: &'a str,
    style: PlaceholderStyle,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder for `table`, keyed by `identity_column`.
    #[must_use]
    pub const fn new(table: &'a str, identity_column: &'a str, style: PlaceholderStyle) -> Self {
        Self {
            table,
            identity_column,
            style,
        }
    }

    /// Builds an INSERT when `id` is `None`, otherwise an UPDATE by identity.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid identifier or an empty column list.
    pub fn build(
        &self,
        fields: Vec<(&str, SqlValue)>,
        id: Option<SqlValue>,
    ) -> Result<SqlStatement, QueryError> {
        match id {
            Some(id) => self.update(fields, id),
            None => self.insert(fields),
        }
    }

    /// `INSERT INTO table (k1, ..., kN) VALUES (p1, ..., pN)`.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid identifier or an empty column list.
    pub fn insert(&self, fields: Vec<(&str, SqlValue)>) -> Result<SqlStatement, QueryError> {
        check_identifier(self.table)?;
        if fields.is_empty() {
            return Err(QueryError::NoColumns);
        }

        let mut columns = Vec::with_capacity(fields.len());
        let mut placeholders = Vec::with_capacity(fields.len());
        let mut params = Vec::with_capacity(fields.len());

        for (position, (column, value)) in fields.into_iter().enumerate() {
            check_identifier(column)?;
            columns.push(column);
            placeholders.push(self.style.placeholder(position + 1));
            params.push(value);
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );
        Ok(SqlStatement::new(sql, params))
    }

    /// `UPDATE table SET k = p, ... WHERE identity = p`.
    ///
    /// The identity column is skipped if present in `fields`; `id` is always
    /// the last parameter.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid identifier or when no non-identity
    /// column remains.
    pub fn update(
        &self,
        fields: Vec<(&str, SqlValue)>,
        id: SqlValue,
    ) -> Result<SqlStatement, QueryError> {
        check_identifier(self.table)?;
        check_identifier(self.identity_column)?;

        let mut assignments = Vec::with_capacity(fields.len());
        let mut params = Vec::with_capacity(fields.len() + 1);

        for (column, value) in fields {
            if column == self.identity_column {
                continue;
            }
            check_identifier(column)?;
            params.push(value);
            assignments.push(format!("{column} = {}", self.style.placeholder(params.len())));
        }

        if assignments.is_empty() {
            return Err(QueryError::NoColumns);
        }

        params.push(id);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {};",
            self.table,
            assignments.join(", "),
            self.identity_column,
            self.style.placeholder(params.len())
        );
        Ok(SqlStatement::new(sql, params))
    }

    /// `SELECT * FROM table WHERE c1 = p AND c2 = p ...`.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid identifier or an empty filter.
    pub fn select_where(
        &self,
        filters: Vec<(&str, SqlValue)>,
    ) -> Result<SqlStatement, QueryError> {
        check_identifier(self.table)?;
        if filters.is_empty() {
            return Err(QueryError::NoColumns);
        }

        let mut conditions = Vec::with_capacity(filters.len());
        let mut params = Vec::with_capacity(filters.len());
        for (column, value) in filters {
            check_identifier(column)?;
            params.push(value);
            conditions.push(format!("{column} = {}", self.style.placeholder(params.len())));
        }

        let sql = format!(
            "SELECT * FROM {} WHERE {};",
            self.table,
            conditions.join(" AND ")
        );
        Ok(SqlStatement::new(sql, params))
    }

    /// `SELECT * FROM table WHERE column IN (p1, ..., pN)`.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid identifier or an empty value list.
    pub fn select_in(
        &self,
        column: &str,
        values: Vec<SqlValue>,
    ) -> Result<SqlStatement, QueryError> {
        check_identifier(self.table)?;
        check_identifier(column)?;
        if values.is_empty() {
            return Err(QueryError::NoColumns);
        }

        let placeholders: Vec<String> = (1..=values.len())
            .map(|position| self.style.placeholder(position))
            .collect();
        let sql = format!(
            "SELECT * FROM {} WHERE {column} IN ({});",
            self.table,
            placeholders.join(", ")
        );
        Ok(SqlStatement::new(sql, values))
    }

    /// `SELECT * FROM table WHERE identity = p`.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid identifier.
    pub fn select_by_id(&self, id: SqlValue) -> Result<SqlStatement, QueryError> {
        self.select_where(vec![(self.identity_column, id)])
    }

    /// `DELETE FROM table WHERE identity = p`.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid identifier.
    pub fn delete_by_id(&self, id: SqlValue) -> Result<SqlStatement, QueryError> {
        check_identifier(self.table)?;
        check_identifier(self.identity_column)?;
        let sql = format!(
            "DELETE FROM {} WHERE {} = {};",
            self.table,
            self.identity_column,
            self.style.placeholder(1)
        );
        Ok(SqlStatement::new(sql, vec![id]))
    }
}

fn check_identifier(name: &str) -> Result<(), QueryError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(QueryError::InvalidIdentifier(name.to_string()))
    }
}
