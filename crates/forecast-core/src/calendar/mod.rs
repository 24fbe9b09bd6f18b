//! Calendar grid layout and event helpers.
//!
//! Everything here is a pure function over slices; persistence lives in
//! `storage::collections`.

mod events;
mod grid;

pub use events::{events_from_plan, events_on_date, insert_missing, plan_on_date, CalendarEvent};
pub use grid::{build_month_grid, build_week, days_in_month, shift_month};
