//! Focus music catalogue and player state.
//!
//! Playback itself belongs to the host; this module only tracks which
//! track is selected, the category filter and the volume.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackCategory {
    Focus,
    Ambient,
    Epic,
    Dark,
}

impl TrackCategory {
    pub const ALL: [TrackCategory; 4] = [
        TrackCategory::Focus,
        TrackCategory::Ambient,
        TrackCategory::Epic,
        TrackCategory::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackCategory::Focus => "focus",
            TrackCategory::Ambient => "ambient",
            TrackCategory::Epic => "epic",
            TrackCategory::Dark => "dark",
        }
    }
}

impl fmt::Display for TrackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ValidationError::invalid("category", format!("unknown track category '{s}'"))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MusicTrack {
    pub id: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
    /// Display length, "M:SS".
    pub duration: &'static str,
    pub category: TrackCategory,
    pub url: Option<&'static str>,
}

const SAMPLE_URL: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";

const fn track(
    id: &'static str,
    title: &'static str,
    artist: &'static str,
    duration: &'static str,
    category: TrackCategory,
    url: &'static str,
) -> MusicTrack {
    MusicTrack {
        id,
        title,
        artist,
        duration,
        category,
        url: Some(url),
    }
}

pub const CATALOGUE: [MusicTrack; 10] = [
    track("1", "Imperial March", "John Williams", "3:02", TrackCategory::Epic, "/assets/Imperial-March.mp3"),
    track("2", "Duel of the Fates", "John Williams", "4:14", TrackCategory::Epic, SAMPLE_URL),
    track("3", "The Force Theme", "John Williams", "5:12", TrackCategory::Ambient, SAMPLE_URL),
    track("4", "Dark Side Meditation", "Sith Academy", "8:30", TrackCategory::Dark, SAMPLE_URL),
    track("5", "Binary Sunset", "John Williams", "2:46", TrackCategory::Ambient, SAMPLE_URL),
    track("6", "Cantina Band", "John Williams", "2:46", TrackCategory::Focus, SAMPLE_URL),
    track("7", "Vader's Theme", "John Williams", "3:15", TrackCategory::Dark, SAMPLE_URL),
    track("8", "Jedi Temple March", "John Williams", "4:02", TrackCategory::Focus, SAMPLE_URL),
    track("9", "Throne Room", "John Williams", "5:41", TrackCategory::Epic, SAMPLE_URL),
    track("10", "Asteroid Field", "John Williams", "4:18", TrackCategory::Ambient, SAMPLE_URL),
];

pub fn find_track(id: &str) -> Option<&'static MusicTrack> {
    CATALOGUE.iter().find(|t| t.id == id)
}

/// `None` means "all".
pub fn tracks_in(category: Option<TrackCategory>) -> Vec<&'static MusicTrack> {
    CATALOGUE
        .iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .collect()
}

fn default_volume() -> f32 {
    0.7
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    category: Option<TrackCategory>,
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    playing: bool,
    #[serde(default = "default_volume")]
    volume: f32,
    #[serde(default)]
    muted: bool,
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            category: None,
            current: None,
            playing: false,
            volume: default_volume(),
            muted: false,
        }
    }
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<TrackCategory> {
        self.category
    }

    pub fn set_category(&mut self, category: Option<TrackCategory>) {
        self.category = category;
    }

    pub fn tracks(&self) -> Vec<&'static MusicTrack> {
        tracks_in(self.category)
    }

    pub fn current(&self) -> Option<&'static MusicTrack> {
        self.current.as_deref().and_then(find_track)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// What the audio sink should use: 0 while muted.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn play(&mut self, id: &str) -> Result<Event, ValidationError> {
        let track = find_track(id).ok_or_else(|| ValidationError::NotFound {
            kind: "track",
            id: id.to_string(),
        })?;
        Ok(self.select(track))
    }

    pub fn toggle_playing(&mut self) -> bool {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
        self.playing
    }

    /// Advance within the filtered list, wrapping past the end.
    pub fn next(&mut self) -> Option<Event> {
        self.step(1)
    }

    /// Step back within the filtered list, wrapping before the start.
    pub fn previous(&mut self) -> Option<Event> {
        self.step(-1)
    }

    /// Non-finite input is rejected; anything else is clamped to [0, 1].
    pub fn set_volume(&mut self, volume: f32) -> Result<f32, ValidationError> {
        if !volume.is_finite() {
            return Err(ValidationError::invalid("volume", "must be a number"));
        }
        self.volume = volume.clamp(0.0, 1.0);
        Ok(self.volume)
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn step(&mut self, delta: isize) -> Option<Event> {
        let list = self.tracks();
        if list.is_empty() {
            return None;
        }
        let len = list.len() as isize;
        let position = self
            .current
            .as_deref()
            .and_then(|id| list.iter().position(|t| t.id == id));
        let index = match position {
            Some(pos) => (pos as isize + delta).rem_euclid(len) as usize,
            None if delta < 0 => list.len() - 1,
            None => 0,
        };
        Some(self.select(list[index]))
    }

    fn select(&mut self, track: &'static MusicTrack) -> Event {
        self.current = Some(track.id.to_string());
        self.playing = true;
        Event::TrackStarted {
            track_id: track.id.to_string(),
            title: track.title.to_string(),
            at: Utc::now(),
        }
    }
}
