//! Shared errors and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{
    AppConfig, ConversionConfig, DatabaseBackend, DatabaseConfig, ExchangeRateConfig,
    ServerConfig,
};
pub use error::AppError;
