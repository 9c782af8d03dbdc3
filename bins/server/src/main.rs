//! Tally API Server
//!
//! Main entry point for the project budget service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, ExchangeRateApiClient, create_router};
use tally_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "tally=debug,tally_api=debug,tally_db=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = tally_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(backend = ?config.database.backend, "Connected to database");

    let rates = ExchangeRateApiClient::new(&config.exchange_rate)?;
    info!(
        base_currency = %config.exchange_rate.base_currency,
        "Exchange rate client configured"
    );

    let state = AppState::new(store, Arc::new(rates), &config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
