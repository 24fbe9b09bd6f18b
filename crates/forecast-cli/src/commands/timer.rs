use clap::{Subcommand, ValueEnum};
use forecast_core::storage::{load_snapshot, save_snapshot};
use forecast_core::{Config, Database, Event, PomodoroSetting, PomodoroTimer};

use super::{print_json, CliResult};

const ENGINE_KEY: &str = "pomodoro_timer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Restore the current mode's full duration
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Change a duration (minutes) or the long-break cadence
    Set {
        setting: SettingName,
        value: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SettingName {
    Work,
    ShortBreak,
    LongBreak,
    Sessions,
}

impl SettingName {
    fn with(self, value: u32) -> PomodoroSetting {
        match self {
            SettingName::Work => PomodoroSetting::WorkMinutes(value),
            SettingName::ShortBreak => PomodoroSetting::ShortBreakMinutes(value),
            SettingName::LongBreak => PomodoroSetting::LongBreakMinutes(value),
            SettingName::Sessions => PomodoroSetting::SessionsBeforeLongBreak(value),
        }
    }
}

fn load_engine(db: &Database, config: &Config) -> Result<PomodoroTimer, Box<dyn std::error::Error>> {
    Ok(load_snapshot(db, ENGINE_KEY)?.unwrap_or_else(|| PomodoroTimer::new(config.pomodoro.clone())))
}

pub fn run(action: TimerAction) -> CliResult {
    let db = Database::open()?;
    let mut config = Config::load_or_default();
    let mut engine = load_engine(&db, &config)?;

    // Apply wall-clock time elapsed since the last invocation.
    let mut events: Vec<Event> = engine.sync().into_iter().collect();

    match action {
        TimerAction::Start => events.extend(engine.start()),
        TimerAction::Pause => events.extend(engine.pause()),
        TimerAction::Reset => events.push(engine.reset()),
        TimerAction::Status => {}
        TimerAction::Set { setting, value } => {
            let setting = setting.with(value);
            events.push(engine.apply_setting(setting)?);
            config.pomodoro = engine.settings().clone();
            config.save()?;
        }
    }
    events.push(engine.snapshot());

    save_snapshot(&db, ENGINE_KEY, &engine)?;
    print_json(&events)
}
