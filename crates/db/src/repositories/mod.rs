//! Repository layer for database operations.

pub mod project_budget;

pub use project_budget::{ProjectBudget, ProjectBudgetRepository};
