use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest interval a setting may request, in minutes.
pub const MAX_INTERVAL_MINUTES: u32 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PomodoroMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl PomodoroMode {
    pub fn label(&self) -> &'static str {
        match self {
            PomodoroMode::Work => "Work Session",
            PomodoroMode::ShortBreak => "Short Break",
            PomodoroMode::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for PomodoroMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Interval lengths and the long-break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_sessions_before_long_break() -> u32 {
    4
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_before_long_break: default_sessions_before_long_break(),
        }
    }
}

impl PomodoroSettings {
    pub fn minutes(&self, mode: PomodoroMode) -> u32 {
        match mode {
            PomodoroMode::Work => self.work_minutes,
            PomodoroMode::ShortBreak => self.short_break_minutes,
            PomodoroMode::LongBreak => self.long_break_minutes,
        }
    }

    /// Uses saturating arithmetic so hand-edited config cannot overflow.
    pub fn duration_secs(&self, mode: PomodoroMode) -> u64 {
        u64::from(self.minutes(mode)).saturating_mul(60)
    }

    /// Check every field against the same bounds `apply` enforces.
    pub fn validate(&self) -> Result<(), ValidationError> {
        [
            PomodoroSetting::WorkMinutes(self.work_minutes),
            PomodoroSetting::ShortBreakMinutes(self.short_break_minutes),
            PomodoroSetting::LongBreakMinutes(self.long_break_minutes),
            PomodoroSetting::SessionsBeforeLongBreak(self.sessions_before_long_break),
        ]
        .iter()
        .try_for_each(PomodoroSetting::validate)
    }

    pub fn apply(&mut self, setting: PomodoroSetting) -> Result<(), ValidationError> {
        setting.validate()?;
        match setting {
            PomodoroSetting::WorkMinutes(v) => self.work_minutes = v,
            PomodoroSetting::ShortBreakMinutes(v) => self.short_break_minutes = v,
            PomodoroSetting::LongBreakMinutes(v) => self.long_break_minutes = v,
            PomodoroSetting::SessionsBeforeLongBreak(v) => self.sessions_before_long_break = v,
        }
        Ok(())
    }
}

/// The recognized pomodoro settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "setting", content = "value", rename_all = "snake_case")]
pub enum PomodoroSetting {
    WorkMinutes(u32),
    ShortBreakMinutes(u32),
    LongBreakMinutes(u32),
    SessionsBeforeLongBreak(u32),
}

impl PomodoroSetting {
    fn validate(&self) -> Result<(), ValidationError> {
        let (field, value, max) = match *self {
            PomodoroSetting::WorkMinutes(v) => ("work_minutes", v, MAX_INTERVAL_MINUTES),
            PomodoroSetting::ShortBreakMinutes(v) => {
                ("short_break_minutes", v, MAX_INTERVAL_MINUTES)
            }
            PomodoroSetting::LongBreakMinutes(v) => ("long_break_minutes", v, MAX_INTERVAL_MINUTES),
            PomodoroSetting::SessionsBeforeLongBreak(v) => ("sessions_before_long_break", v, 12),
        };
        if value == 0 || value > max {
            return Err(ValidationError::invalid(
                field,
                format!("{value} is outside 1..={max}"),
            ));
        }
        Ok(())
    }
}

/// `MM:SS` clock face.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations() {
        let s = PomodoroSettings::default();
        assert_eq!(s.duration_secs(PomodoroMode::Work), 25 * 60);
        assert_eq!(s.duration_secs(PomodoroMode::ShortBreak), 5 * 60);
        assert_eq!(s.duration_secs(PomodoroMode::LongBreak), 15 * 60);
    }

    #[test]
    fn apply_rejects_zero_and_oversized() {
        let mut s = PomodoroSettings::default();
        assert!(s.apply(PomodoroSetting::WorkMinutes(0)).is_err());
        assert!(s.apply(PomodoroSetting::LongBreakMinutes(181)).is_err());
        assert_eq!(s, PomodoroSettings::default());
        s.apply(PomodoroSetting::ShortBreakMinutes(7)).unwrap();
        assert_eq!(s.short_break_minutes, 7);
    }

    #[test]
    fn validate_catches_hand_edited_values() {
        let mut s = PomodoroSettings::default();
        assert!(s.validate().is_ok());
        s.sessions_before_long_break = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn clock_pads_both_fields() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn mode_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&PomodoroMode::ShortBreak).unwrap(),
            "\"shortBreak\""
        );
    }
}
