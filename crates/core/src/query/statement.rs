//! Statements and bound values.

use rust_decimal::Decimal;

/// Placeholder syntax understood by a database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Anonymous `?` placeholders (SQLite, MySQL).
    QuestionMark,
    /// Numbered `$1`, `$2`, ... placeholders (PostgreSQL).
    Numbered,
}

impl PlaceholderStyle {
    /// Renders the placeholder for the 1-based parameter `position`.
    #[must_use]
    pub fn placeholder(self, position: usize) -> String {
        match self {
            Self::QuestionMark => "?".to_string(),
            Self::Numbered => format!("${position}"),
        }
    }

    /// Counts the placeholders in a SQL text produced with this style.
    #[cfg(test)]
    pub(crate) fn count(self, sql: &str) -> usize {
        match self {
            Self::QuestionMark => sql.matches('?').count(),
            Self::Numbered => sql.matches('$').count(),
        }
    }
}

/// A value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// Integer value.
    Int(i64),
    /// Exact decimal value.
    Decimal(Decimal),
    /// Text value.
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// SQL text plus its ordered parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    /// SQL text containing placeholders.
    pub sql: String,
    /// Parameters, in placeholder order.
    pub params: Vec<SqlValue>,
}

impl SqlStatement {
    /// Creates a statement from SQL text and parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Returns true if the trimmed SQL starts with any of `keywords`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn starts_with_any(&self, keywords: &[&str]) -> bool {
        let sql = self.sql.trim_start();
        keywords.iter().any(|keyword| {
            sql.get(..keyword.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
        })
    }
}
