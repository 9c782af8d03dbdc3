//! Data access layer for project budgets.
//!
//! This crate provides:
//! - Two interchangeable stores: in-memory SQLite and PostgreSQL
//! - The project budget repository
//! - Database migrations and a health probe

pub mod health;
pub mod migration;
pub mod repositories;
pub mod store;

pub use repositories::{ProjectBudget, ProjectBudgetRepository};
pub use store::{EmbeddedStore, NetworkedStore, Store, StoreError};

use std::sync::Arc;

use sea_orm::DbErr;
use tally_shared::{DatabaseBackend, DatabaseConfig};

/// Opens the store selected by `config.backend`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, or if the
/// networked backend is selected without a URL.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn Store>, DbErr> {
    let store: Arc<dyn Store> = match config.backend {
        DatabaseBackend::Embedded => Arc::new(EmbeddedStore::connect().await?),
        DatabaseBackend::Networked => {
            let url = config.url.as_deref().ok_or_else(|| {
                DbErr::Custom("database.url is required for the networked backend".to_string())
            })?;
            Arc::new(NetworkedStore::connect(url, config).await?)
        }
    };
    Ok(store)
}
