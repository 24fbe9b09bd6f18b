use chrono::{Datelike, NaiveDate, Utc};
use clap::Subcommand;
use forecast_core::calendar::{
    build_month_grid, build_week, events_from_plan, events_on_date, plan_on_date, shift_month,
    CalendarEvent,
};
use forecast_core::storage::{EventStore, PlanStore};
use forecast_core::{Database, Priority, ValidationError};
use serde::Serialize;

use super::{find_plan, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Month grid with per-day event counts
    Month {
        #[arg(long)]
        year: Option<i32>,
        /// 1-12
        #[arg(long)]
        month: Option<u32>,
        /// Months to move from the chosen month (e.g. -1 for previous)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,
    },
    /// The Sunday-first week containing a date
    Week {
        /// YYYY-MM-DD (today when omitted)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Add an event
    Add {
        title: String,
        /// YYYY-MM-DD (today when omitted)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// HH:MM
        #[arg(long, default_value = "09:00")]
        time: String,
        /// critical, high or standard
        #[arg(long, default_value = "standard")]
        priority: Priority,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List events, optionally for one date
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete an event
    Delete { id: String },
    /// Derive events from a plan's schedule (latest plan when no id is given)
    FromPlan {
        #[arg(long)]
        plan_id: Option<String>,
        /// Target date (today when omitted)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct DayCell {
    date: NaiveDate,
    events: usize,
    has_plan: bool,
}

#[derive(Serialize)]
struct MonthView {
    year: i32,
    month: u32,
    cells: Vec<Option<DayCell>>,
}

#[derive(Serialize)]
struct DayView<'a> {
    date: NaiveDate,
    events: Vec<&'a CalendarEvent>,
}

pub fn run(action: CalendarAction) -> CliResult {
    let db = Database::open()?;
    let store = EventStore::events(&db);

    match action {
        CalendarAction::Month { year, month, shift } => {
            let now = today();
            let (year, month) = shift_month(
                year.unwrap_or(now.year()),
                month.unwrap_or(now.month()),
                shift,
            )?;
            let events = store.list()?;
            let plans = PlanStore::plans(&db).list()?;
            let cells = build_month_grid(year, month)?
                .into_iter()
                .map(|cell| {
                    cell.map(|date| DayCell {
                        date,
                        events: events_on_date(&events, date).len(),
                        has_plan: plan_on_date(&plans, date).is_some(),
                    })
                })
                .collect();
            print_json(&MonthView { year, month, cells })?;
        }
        CalendarAction::Week { date } => {
            let events = store.list()?;
            let days: Vec<DayView> = build_week(date.unwrap_or_else(today))
                .into_iter()
                .map(|date| DayView {
                    date,
                    events: events_on_date(&events, date),
                })
                .collect();
            print_json(&days)?;
        }
        CalendarAction::Add {
            title,
            date,
            time,
            priority,
            description,
        } => {
            let event = CalendarEvent::new(
                title,
                description,
                date.unwrap_or_else(today),
                time,
                priority,
                Utc::now(),
            )?;
            store.upsert(event.clone())?;
            print_json(&event)?;
        }
        CalendarAction::List { date } => {
            let events = store.list()?;
            match date {
                Some(date) => print_json(&events_on_date(&events, date))?,
                None => print_json(&events)?,
            }
        }
        CalendarAction::Delete { id } => {
            if !store.delete(&id)? {
                return Err(ValidationError::NotFound { kind: "event", id }.into());
            }
            print_json(&serde_json::json!({ "deleted": id }))?;
        }
        CalendarAction::FromPlan { plan_id, date } => {
            let plan = find_plan(&db, plan_id.as_deref())?;
            let derived = events_from_plan(&plan, date.unwrap_or_else(today), Utc::now());
            let added = store.insert_missing(derived)?;
            print_json(&serde_json::json!({ "plan_id": plan.id, "added": added }))?;
        }
    }
    Ok(())
}
