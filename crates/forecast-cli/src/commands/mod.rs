pub mod battle;
pub mod calendar;
pub mod chat;
pub mod config;
pub mod music;
pub mod plan;
pub mod timer;

use chrono::{Local, NaiveDate};
use forecast_core::storage::PlanStore;
use forecast_core::{Database, DailyPlan, ValidationError};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The plan with `id`, or the newest plan when no id is given.
pub fn find_plan(db: &Database, id: Option<&str>) -> Result<DailyPlan, Box<dyn std::error::Error>> {
    let store = PlanStore::plans(db);
    let plan = match id {
        Some(id) => store.get(id)?,
        None => store.latest()?,
    };
    plan.ok_or_else(|| {
        ValidationError::NotFound {
            kind: "plan",
            id: id.unwrap_or("latest").to_string(),
        }
        .into()
    })
}
