//! Exchange-rate client.
//!
//! Rates come from a rate-table endpoint at
//! `{base_url}/{api_key}/latest/{base_currency}`, which answers with every
//! rate against the base currency. Each lookup performs a fresh request.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tally_shared::ExchangeRateConfig;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while fetching a rate.
#[derive(Debug, Error)]
pub enum RateError {
    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Source of exchange rates against the base currency.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Units of `code` per one unit of the base currency, or `None` when no
    /// rate is available.
    async fn rate(&self, code: &str) -> Result<Option<Decimal>, RateError>;
}

#[derive(Debug, Deserialize)]
struct RateTable {
    #[serde(default)]
    conversion_rates: HashMap<String, Decimal>,
}

/// [`RateProvider`] backed by the rate-table HTTP endpoint.
#[derive(Debug, Clone)]
pub struct ExchangeRateApiClient {
    client: Client,
    url: String,
}

impl ExchangeRateApiClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ExchangeRateConfig) -> Result<Self, RateError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            url: latest_url(config),
        })
    }
}

fn latest_url(config: &ExchangeRateConfig) -> String {
    format!(
        "{}/{}/latest/{}",
        config.base_url.trim_end_matches('/'),
        config.api_key,
        config.base_currency
    )
}

#[async_trait]
impl RateProvider for ExchangeRateApiClient {
    async fn rate(&self, code: &str) -> Result<Option<Decimal>, RateError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, currency = code, "Rate endpoint returned an error status");
            return Ok(None);
        }

        let table: RateTable = response.json().await?;
        let rate = table.conversion_rates.get(code).copied();
        debug!(currency = code, ?rate, "Fetched exchange rate");
        Ok(rate)
    }
}
