//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All payload rules, statement generation, and conversions live here.
//!
//! # Modules
//!
//! - `budget` - Project budget schema and payload validation
//! - `query` - Parameterized SQL generation
//! - `currency` - Converted amounts and derived currency fields

pub mod budget;
pub mod currency;
pub mod query;
