//! Daily plans: the model, validation of generated content, and exports.

mod content;
mod export;
mod model;

pub use content::{GeneratedContent, GOAL_COUNT};
pub use export::{export_file_name, export_plans, import_plans, plan_as_text};
pub use model::{is_valid_time, DailyPlan, Priority, ScheduleItem};
