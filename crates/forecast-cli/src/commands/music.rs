use clap::Subcommand;
use forecast_core::storage::{load_snapshot, save_snapshot};
use forecast_core::timer::{MusicTrack, TrackCategory};
use forecast_core::{Database, Event, Playlist};
use serde::Serialize;

use super::{print_json, CliResult};

const PLAYLIST_KEY: &str = "playlist";

#[derive(Subcommand)]
pub enum MusicAction {
    /// List tracks, optionally setting the category filter
    List {
        /// focus, ambient, epic, dark or all
        #[arg(long)]
        category: Option<String>,
    },
    /// Play a track by id
    Play { id: String },
    /// Pause or resume the current track
    Toggle,
    /// Next track in the filtered list
    Next,
    /// Previous track in the filtered list
    Prev,
    /// Set volume between 0.0 and 1.0
    Volume { value: f32 },
    /// Toggle mute
    Mute,
}

#[derive(Serialize)]
struct PlayerView {
    event: Option<Event>,
    current: Option<&'static MusicTrack>,
    playing: bool,
    category: Option<TrackCategory>,
    volume: f32,
    muted: bool,
    effective_volume: f32,
}

fn view(playlist: &Playlist, event: Option<Event>) -> PlayerView {
    PlayerView {
        event,
        current: playlist.current(),
        playing: playlist.is_playing(),
        category: playlist.category(),
        volume: playlist.volume(),
        muted: playlist.is_muted(),
        effective_volume: playlist.effective_volume(),
    }
}

fn parse_category(raw: &str) -> Result<Option<TrackCategory>, Box<dyn std::error::Error>> {
    if raw.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        Ok(Some(raw.parse()?))
    }
}

pub fn run(action: MusicAction) -> CliResult {
    let db = Database::open()?;
    let mut playlist: Playlist = load_snapshot(&db, PLAYLIST_KEY)?.unwrap_or_default();

    let output = match action {
        MusicAction::List { category } => {
            if let Some(raw) = category {
                playlist.set_category(parse_category(&raw)?);
            }
            serde_json::to_value(playlist.tracks())?
        }
        MusicAction::Play { id } => {
            let event = playlist.play(&id)?;
            serde_json::to_value(view(&playlist, Some(event)))?
        }
        MusicAction::Toggle => {
            playlist.toggle_playing();
            serde_json::to_value(view(&playlist, None))?
        }
        MusicAction::Next => {
            let event = playlist.next();
            serde_json::to_value(view(&playlist, event))?
        }
        MusicAction::Prev => {
            let event = playlist.previous();
            serde_json::to_value(view(&playlist, event))?
        }
        MusicAction::Volume { value } => {
            playlist.set_volume(value)?;
            serde_json::to_value(view(&playlist, None))?
        }
        MusicAction::Mute => {
            playlist.toggle_mute();
            serde_json::to_value(view(&playlist, None))?
        }
    };

    save_snapshot(&db, PLAYLIST_KEY, &playlist)?;
    print_json(&output)
}
