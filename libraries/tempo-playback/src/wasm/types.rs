//! WASM-compatible type definitions

use crate::PlaybackState;
use serde::Serialize;
use tempo_core::TrackSnapshot;

/// Playback state as handed to JavaScript subscribers
///
/// Times are seconds (`f64`) and the track/queue entries use the catalog's
/// JSON shape, so the UI can render them without another conversion.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmPlaybackState {
    current_track: Option<TrackSnapshot>,
    queue: Vec<TrackSnapshot>,
    /// -1 when nothing is loaded
    current_index: i64,
    is_playing: bool,
    is_loading: bool,
    current_time: f64,
    duration: f64,
    volume: f32,
    is_muted: bool,
    is_shuffled: bool,
    repeat_mode: &'static str,
    progress: f32,
    has_next: bool,
    has_previous: bool,
}

impl From<&PlaybackState> for WasmPlaybackState {
    fn from(state: &PlaybackState) -> Self {
        Self {
            current_track: state.current_track.as_ref().map(TrackSnapshot::from),
            queue: state.queue.iter().map(TrackSnapshot::from).collect(),
            current_index: state.current_index.map_or(-1, |i| i as i64),
            is_playing: state.is_playing,
            is_loading: state.is_loading,
            current_time: state.current_time.as_secs_f64(),
            duration: state.duration.as_secs_f64(),
            volume: state.volume,
            is_muted: state.is_muted,
            is_shuffled: state.is_shuffled,
            repeat_mode: state.repeat_mode.as_str(),
            progress: state.progress(),
            has_next: state.has_next(),
            has_previous: state.has_previous(),
        }
    }
}
