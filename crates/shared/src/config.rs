//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Exchange rate endpoint configuration.
    #[serde(default)]
    pub exchange_rate: ExchangeRateConfig,
    /// Batch conversion configuration.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which store backs the data access layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// In-memory SQLite, recreated on every start. Used by tests.
    #[default]
    Embedded,
    /// PostgreSQL reached through `DatabaseConfig::url`.
    Networked,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Store implementation to use.
    #[serde(default)]
    pub backend: DatabaseBackend,
    /// Database connection URL (required for the networked backend).
    #[serde(default)]
    pub url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Exchange rate endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRateConfig {
    /// Base URL of the rate-table API, without the key segment.
    #[serde(default = "default_rate_base_url")]
    pub base_url: String,
    /// API key, inserted as a path segment.
    #[serde(default)]
    pub api_key: String,
    /// Currency the rate table is expressed against.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            base_url: default_rate_base_url(),
            api_key: String::new(),
            base_currency: default_base_currency(),
        }
    }
}

fn default_rate_base_url() -> String {
    "https://v6.exchangerate-api.com/v6".to_string()
}

fn default_base_currency() -> String {
    "USD".to_string()
}

/// Batch conversion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// Target currency for the batch conversion.
    #[serde(default = "default_conversion_currency")]
    pub currency: String,
    /// Project names included in the batch conversion.
    #[serde(default = "default_project_names")]
    pub project_names: Vec<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            currency: default_conversion_currency(),
            project_names: default_project_names(),
        }
    }
}

fn default_conversion_currency() -> String {
    "TTD".to_string()
}

fn default_project_names() -> Vec<String> {
    [
        "Peking roasted duck Chanel",
        "Choucroute Cartier",
        "Rigua Nintendo",
        "Llapingacho Instagram",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `TALLY__SECTION__KEY` environment variables.
    /// `TALLY__CONVERSION__PROJECT_NAMES` is a comma-separated list.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("conversion.project_names"),
            )
            .build()?;

        config.try_deserialize()
    }
}
