//! # Force Forecast Core Library
//!
//! Core logic for the Force Forecast planner. Every operation is available
//! through the standalone `forecast` CLI, which is a thin host over this
//! crate.
//!
//! ## Architecture
//!
//! - **Battle**: turn-based combat state machine. Randomness is injected
//!   through [`Dice`]; the deferred enemy turn is an explicit phase.
//! - **Timer**: pomodoro cycle driven by the caller via `tick()` or wall-clock
//!   `catch_up()`, plus the focus-music playlist
//! - **Calendar**: month/week grids and event derivation from plans
//! - **Plan**: daily plans, validation of generated content, exports
//! - **Storage**: SQLite key-value store, typed JSON collections, TOML config
//! - **Generation**: Gemini client, plan forecaster and chat advisors
//!
//! ## Key Components
//!
//! - [`BattleEngine`]: combat state machine
//! - [`PomodoroTimer`]: pomodoro state machine
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management
//! - [`LanguageModel`]: trait for generative API clients

pub mod battle;
pub mod calendar;
pub mod error;
pub mod events;
pub mod generation;
pub mod plan;
pub mod storage;
pub mod timer;

pub use battle::{Action, BattleEngine, BattleEvent, BattlePhase, Dice, RandDice};
pub use calendar::CalendarEvent;
pub use error::{
    BattleError, ConfigError, CoreError, GenerationError, Result, StorageError, ValidationError,
};
pub use events::Event;
pub use generation::{Advisor, ChatAdvisor, Forecaster, GeminiClient, KeywordAdvisor, LanguageModel};
pub use plan::{DailyPlan, GeneratedContent, Priority, ScheduleItem};
pub use storage::{Config, Database, KeyValueStore};
pub use timer::{Playlist, PomodoroMode, PomodoroSetting, PomodoroSettings, PomodoroTimer};
