//! Project budget table.
//!
//! SQLite and PostgreSQL disagree on numeric types, so each backend gets its
//! own DDL. Statements run one at a time because SQLite executes only the
//! first statement of a batch.

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let statements = match manager.get_database_backend() {
            DbBackend::Sqlite => SQLITE_SQL,
            _ => POSTGRES_SQL,
        };
        for sql in statements {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP INDEX IF EXISTS idx_project_year_name;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS project;").await?;
        Ok(())
    }
}

const SQLITE_SQL: &[&str] = &[
    r"
CREATE TABLE project (
    project_id INTEGER PRIMARY KEY,
    project_name TEXT NOT NULL,
    year INTEGER NOT NULL,
    currency TEXT NOT NULL,
    initial_budget_local REAL NOT NULL,
    budget_usd REAL NOT NULL,
    initial_schedule_estimate_months REAL NOT NULL,
    adjusted_schedule_estimate_months REAL NOT NULL,
    contingency_rate REAL NOT NULL,
    escalation_rate REAL NOT NULL,
    final_budget_usd REAL NOT NULL
);",
    "CREATE INDEX idx_project_year_name ON project(year, project_name);",
];

const POSTGRES_SQL: &[&str] = &[
    r"
CREATE TABLE project (
    project_id BIGINT PRIMARY KEY,
    project_name VARCHAR(255) NOT NULL,
    year BIGINT NOT NULL,
    currency VARCHAR(10) NOT NULL,
    initial_budget_local NUMERIC(20, 4) NOT NULL,
    budget_usd NUMERIC(20, 4) NOT NULL,
    initial_schedule_estimate_months NUMERIC(20, 4) NOT NULL,
    adjusted_schedule_estimate_months NUMERIC(20, 4) NOT NULL,
    contingency_rate NUMERIC(20, 4) NOT NULL,
    escalation_rate NUMERIC(20, 4) NOT NULL,
    final_budget_usd NUMERIC(20, 4) NOT NULL
);",
    "CREATE INDEX idx_project_year_name ON project(year, project_name);",
];
