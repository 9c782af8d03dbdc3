//! Database seeder for Tally development.
//!
//! Inserts the four projects named in the default batch conversion list
//! into the configured networked database. Existing ids are left alone.
//!
//! Usage: TALLY__DATABASE__BACKEND=networked cargo run --bin seeder

use anyhow::{Context, bail};
use serde_json::{Value, json};
use tally_core::budget::{Payload, to_columns};
use tally_db::{ProjectBudgetRepository, StoreError};
use tally_shared::{AppConfig, DatabaseBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    if config.database.backend == DatabaseBackend::Embedded {
        bail!("The embedded store is discarded on exit; set database.backend = \"networked\"");
    }

    println!("Connecting to database...");
    let store = tally_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    let repository = ProjectBudgetRepository::new(store);

    println!("Seeding project budgets...");
    for project in sample_projects() {
        let Value::Object(payload) = project else {
            continue;
        };
        seed(&repository, &payload).await?;
    }

    println!("Seeding complete!");
    Ok(())
}

async fn seed(repository: &ProjectBudgetRepository, payload: &Payload) -> anyhow::Result<()> {
    let name = payload
        .get("projectName")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let columns = to_columns(payload, true)?;

    match repository.insert(columns).await {
        Ok(()) => println!("  inserted {name}"),
        Err(StoreError::DuplicateKey(_)) => println!("  {name} already present, skipped"),
        Err(e) => return Err(e).with_context(|| format!("Failed to insert {name}")),
    }
    Ok(())
}

fn sample_projects() -> [Value; 4] {
    [
        project(38, "Llapingacho Instagram", 2000, [781_688.85, 402_319.77, 19.0, 21.0, 3.09, 4.96, 435_323.12]),
        project(321, "Peking roasted duck Chanel", 2000, [767_063.85, 621_610.48, 21.0, 19.0, 7.14, 3.58, 689_836.03]),
        project(504, "Choucroute Cartier", 2000, [848_895.86, 720_265.74, 23.0, 21.0, 0.93, 2.88, 747_900.78]),
        project(184, "Rigua Nintendo", 2001, [448_429.37, 253_943.51, 14.0, 12.0, 5.92, 3.04, 277_153.87]),
    ]
}

fn project(id: i64, name: &str, year: i64, amounts: [f64; 7]) -> Value {
    let [local, usd, initial_months, adjusted_months, contingency, escalation, final_usd] = amounts;
    json!({
        "projectId": id,
        "projectName": name,
        "year": year,
        "currency": "GBP",
        "initialBudgetLocal": local,
        "budgetUsd": usd,
        "initialScheduleEstimateMonths": initial_months,
        "adjustedScheduleEstimateMonths": adjusted_months,
        "contingencyRate": contingency,
        "escalationRate": escalation,
        "finalBudgetUsd": final_usd
    })
}
