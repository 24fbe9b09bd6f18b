//! Pomodoro cycle engine.
//!
//! The engine counts down in whole seconds and has no internal thread. The
//! caller drives it, either with `tick()` once per second or with
//! `catch_up()` using wall-clock time, which is how the CLI resumes a
//! countdown persisted between invocations.
//!
//! ## Mode Transitions
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... (every Nth work session) -> LongBreak -> Work
//! ```
//!
//! Each completed interval stops the clock; `start()` is required to continue.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mode::{format_clock, PomodoroMode, PomodoroSetting, PomodoroSettings};
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    mode: PomodoroMode,
    running: bool,
    seconds_remaining: u64,
    /// Length of the interval in progress, fixed when it began.
    interval_secs: u64,
    completed_work_sessions: u32,
    /// Wall-clock anchor (ms since epoch) for `catch_up`. Only set while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl PomodoroTimer {
    /// New timer in work mode, stopped, with a full interval.
    pub fn new(settings: PomodoroSettings) -> Self {
        let interval_secs = settings.duration_secs(PomodoroMode::Work);
        Self {
            settings,
            mode: PomodoroMode::Work,
            running: false,
            seconds_remaining: interval_secs,
            interval_secs,
            completed_work_sessions: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress(&self) -> f64 {
        if self.interval_secs == 0 {
            return 0.0;
        }
        1.0 - (self.seconds_remaining as f64 / self.interval_secs as f64)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            running: self.running,
            seconds_remaining: self.seconds_remaining,
            interval_secs: self.interval_secs,
            completed_work_sessions: self.completed_work_sessions,
            progress: self.progress(),
            clock: format_clock(self.seconds_remaining),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.last_tick_epoch_ms = Some(now_ms);
        Some(Event::TimerStarted {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    /// Flushes elapsed wall-clock time first, so a pause never loses seconds.
    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.catch_up(now_ms).is_some() {
            // Interval ran out before the pause; completion already stopped it.
            return None;
        }
        self.running = false;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerPaused {
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Restore the current mode's configured duration. Mode is unchanged.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.last_tick_epoch_ms = None;
        self.interval_secs = self.settings.duration_secs(self.mode);
        self.seconds_remaining = self.interval_secs;
        Event::TimerReset {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        }
    }

    /// One elapsed second. Returns `Some(Event::IntervalCompleted)` when the
    /// countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            return Some(self.complete_interval());
        }
        None
    }

    /// Apply every whole second elapsed since the last anchor. The sub-second
    /// remainder is carried to the next call.
    pub fn catch_up(&mut self, now_ms: u64) -> Option<Event> {
        let last = match (self.running, self.last_tick_epoch_ms) {
            (true, Some(last)) => last,
            _ => return None,
        };
        let whole_secs = now_ms.saturating_sub(last) / 1000;
        self.last_tick_epoch_ms = Some(last + whole_secs * 1000);

        for _ in 0..whole_secs.min(self.seconds_remaining) {
            if let Some(event) = self.tick() {
                return Some(event);
            }
        }
        None
    }

    /// `catch_up` against the system clock.
    pub fn sync(&mut self) -> Option<Event> {
        self.catch_up(now_ms())
    }

    /// Change a duration or the long-break cadence. The interval in progress
    /// keeps its length; the change applies at the next transition or reset.
    pub fn apply_setting(&mut self, setting: PomodoroSetting) -> Result<Event, ValidationError> {
        self.settings.apply(setting)?;
        Ok(Event::SettingChanged {
            setting,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_interval(&mut self) -> Event {
        let completed = self.mode;
        let next = match completed {
            PomodoroMode::Work => {
                self.completed_work_sessions += 1;
                let cadence = self.settings.sessions_before_long_break.max(1);
                if self.completed_work_sessions % cadence == 0 {
                    PomodoroMode::LongBreak
                } else {
                    PomodoroMode::ShortBreak
                }
            }
            PomodoroMode::ShortBreak | PomodoroMode::LongBreak => PomodoroMode::Work,
        };

        self.mode = next;
        self.interval_secs = self.settings.duration_secs(next);
        self.seconds_remaining = self.interval_secs;
        self.running = false;
        self.last_tick_epoch_ms = None;
        debug!(?completed, ?next, sessions = self.completed_work_sessions, "interval completed");

        Event::IntervalCompleted {
            completed,
            next,
            completed_work_sessions: self.completed_work_sessions,
            at: Utc::now(),
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(PomodoroSettings::default())
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
