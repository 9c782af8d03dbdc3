//! Parameterized SQL generation.
//!
//! Values never appear in generated SQL text; they travel as bound
//! parameters in the same order as their placeholders.

pub mod builder;
pub mod statement;

#[cfg(test)]
mod props;

pub use builder::{QueryBuilder, QueryError};
pub use statement::{PlaceholderStyle, SqlStatement, SqlValue};
