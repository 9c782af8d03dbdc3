//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for project budgets and currency conversion
//! - The exchange-rate client
//! - Error-to-response mapping

pub mod error;
pub mod extractors;
pub mod rates;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tally_db::{ProjectBudgetRepository, Store};
use tally_shared::{AppConfig, ConversionConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use rates::{ExchangeRateApiClient, RateError, RateProvider};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store backing the repository and the health probe.
    pub store: Arc<dyn Store>,
    /// Project budget repository.
    pub repository: ProjectBudgetRepository,
    /// Exchange-rate source.
    pub rates: Arc<dyn RateProvider>,
    /// Batch conversion settings.
    pub conversion: Arc<ConversionConfig>,
    /// Currency budgets are stored in; lookups in it skip the rate call.
    pub base_currency: Arc<str>,
}

impl AppState {
    /// Builds the state from a store, a rate source and the loaded config.
    pub fn new(store: Arc<dyn Store>, rates: Arc<dyn RateProvider>, config: &AppConfig) -> Self {
        Self {
            repository: ProjectBudgetRepository::new(Arc::clone(&store)),
            store,
            rates,
            conversion: Arc::new(config.conversion.clone()),
            base_currency: Arc::from(config.exchange_rate.base_currency.as_str()),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
