mod engine;
mod mode;
pub mod playlist;

pub use engine::PomodoroTimer;
pub use mode::{format_clock, PomodoroMode, PomodoroSetting, PomodoroSettings, MAX_INTERVAL_MINUTES};
pub use playlist::{MusicTrack, Playlist, TrackCategory, CATALOGUE};
