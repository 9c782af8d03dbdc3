//! Database migration runner for the networked store.
//!
//! The embedded store migrates itself on connect, so this is only needed
//! against PostgreSQL. The target comes from `DATABASE_URL` or `-u`.
//!
//! Usage:
//!   migrator up      - Create the project table
//!   migrator down    - Drop it
//!   migrator status  - Show migration status

use sea_orm_migration::prelude::*;
use tally_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
