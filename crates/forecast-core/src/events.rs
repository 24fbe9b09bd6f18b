use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{PomodoroMode, PomodoroSetting};

/// Every pomodoro and playlist state change produces an Event.
/// The host prints or forwards them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: PomodoroMode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: PomodoroMode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    IntervalCompleted {
        completed: PomodoroMode,
        next: PomodoroMode,
        completed_work_sessions: u32,
        at: DateTime<Utc>,
    },
    SettingChanged {
        setting: PomodoroSetting,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: PomodoroMode,
        running: bool,
        seconds_remaining: u64,
        interval_secs: u64,
        completed_work_sessions: u32,
        /// Fraction of the current interval elapsed, 0.0 to 1.0.
        progress: f64,
        clock: String,
        at: DateTime<Utc>,
    },
    TrackStarted {
        track_id: String,
        title: String,
        at: DateTime<Utc>,
    },
}
