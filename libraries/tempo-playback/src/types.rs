//! Core types for playback coordination

use crate::queue::{self, Direction, Target};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tempo_core::{PlaybackSettings, RepeatMode, Track};

/// The shared playback record.
///
/// One instance lives inside the [`PlaybackCoordinator`](crate::PlaybackCoordinator);
/// subscribers only ever see clones of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Track loaded into the engine; `None` until something has played
    pub current_track: Option<Track>,

    /// Active play context
    pub queue: Vec<Track>,

    /// Position of `current_track` in `queue`
    pub current_index: Option<usize>,

    /// Engine is producing audio (not merely loaded)
    pub is_playing: bool,

    /// A load is in flight and the engine has not confirmed readiness
    pub is_loading: bool,

    /// Playback position
    pub current_time: Duration,

    /// Length of `current_track`; zero until the engine reports it
    pub duration: Duration,

    /// Output volume in `[0, 1]`, kept while muted
    pub volume: f32,

    /// Output silenced without touching `volume`
    pub is_muted: bool,

    /// Random next/previous selection; the queue order is untouched
    pub is_shuffled: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,
}

impl PlaybackState {
    /// Idle state with the configured transport settings
    pub fn new(config: &PlaybackConfig) -> Self {
        let volume = crate::volume::clamp(config.volume);
        Self {
            current_track: None,
            queue: Vec::new(),
            current_index: None,
            is_playing: false,
            is_loading: false,
            current_time: Duration::ZERO,
            duration: Duration::ZERO,
            volume,
            is_muted: volume == 0.0,
            is_shuffled: config.shuffle,
            repeat_mode: config.repeat,
        }
    }

    /// Played fraction of the current track, 0 while the duration is unknown
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.current_time.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Gain actually applied to the output
    pub fn effective_volume(&self) -> f32 {
        crate::volume::output_gain(self.volume, self.is_muted)
    }

    /// Whether `next()` would load a track
    pub fn has_next(&self) -> bool {
        self.navigation_target(Direction::Forward).is_some()
    }

    /// Whether `previous()` would load a track
    pub fn has_previous(&self) -> bool {
        self.navigation_target(Direction::Backward).is_some()
    }

    pub(crate) fn navigation_target(&self, direction: Direction) -> Option<Target> {
        queue::target(
            self.queue.len(),
            self.current_index,
            self.repeat_mode,
            self.is_shuffled,
            direction,
        )
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

/// Initial transport settings for the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

impl From<&PlaybackSettings> for PlaybackConfig {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            volume: settings.volume,
            shuffle: settings.shuffle,
            repeat: settings.repeat,
        }
    }
}

/// Convert seconds reported by a media element or UI control
///
/// NaN and negative values map to zero, values past the `Duration` range
/// saturate at `Duration::MAX`.
pub fn duration_from_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Format a position as `m:ss` for transport displays
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Song {id}"), "Artist", format!("https://cdn/{id}.mp3"))
    }

    #[test]
    fn default_state_is_idle() {
        let state = PlaybackState::default();
        assert!(state.current_track.is_none());
        assert_eq!(state.current_index, None);
        assert!(!state.is_playing);
        assert_eq!(state.volume, 1.0);
        assert_eq!(state.repeat_mode, RepeatMode::Off);
    }

    #[test]
    fn config_from_settings() {
        let settings = PlaybackSettings {
            volume: 0.3,
            shuffle: true,
            repeat: RepeatMode::One,
        };
        let config = PlaybackConfig::from(&settings);
        let state = PlaybackState::new(&config);

        assert!(state.is_shuffled);
        assert_eq!(state.repeat_mode, RepeatMode::One);
        assert!((state.volume - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_configured_volume_starts_muted() {
        let state = PlaybackState::new(&PlaybackConfig {
            volume: 0.0,
            ..Default::default()
        });
        assert!(state.is_muted);
    }

    #[test]
    fn progress_handles_unknown_duration() {
        let mut state = PlaybackState::default();
        state.current_time = Duration::from_secs(10);
        assert_eq!(state.progress(), 0.0);

        state.duration = Duration::from_secs(40);
        assert!((state.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn effective_volume_respects_mute() {
        let mut state = PlaybackState::default();
        state.volume = 0.8;
        assert!((state.effective_volume() - 0.8).abs() < f32::EPSILON);

        state.is_muted = true;
        assert_eq!(state.effective_volume(), 0.0);
        assert!((state.volume - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn has_next_and_previous_follow_mode() {
        let mut state = PlaybackState::default();
        assert!(!state.has_next());
        assert!(!state.has_previous());

        state.queue = vec![track("1"), track("2"), track("3")];
        state.current_index = Some(2);
        assert!(!state.has_next());
        assert!(state.has_previous());

        state.repeat_mode = RepeatMode::All;
        assert!(state.has_next());

        state.repeat_mode = RepeatMode::Off;
        state.current_index = Some(0);
        assert!(state.has_next());
        assert!(!state.has_previous());

        state.is_shuffled = true;
        assert!(state.has_previous());
    }

    #[test]
    fn seconds_conversion_never_panics() {
        assert_eq!(duration_from_secs(f64::NAN), Duration::ZERO);
        assert_eq!(duration_from_secs(-3.0), Duration::ZERO);
        assert_eq!(duration_from_secs(f64::NEG_INFINITY), Duration::ZERO);
        assert_eq!(duration_from_secs(1e20), Duration::MAX);
        assert_eq!(duration_from_secs(f64::INFINITY), Duration::MAX);
        assert_eq!(duration_from_secs(2.5), Duration::from_millis(2500));
    }

    #[test]
    fn format_time_handles_saturated_duration() {
        let text = format_time(duration_from_secs(1e20));
        assert!(text.ends_with(&format!(":{:02}", u64::MAX % 60)));
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(Duration::ZERO), "0:00");
        assert_eq!(format_time(Duration::from_secs_f64(65.9)), "1:05");
        assert_eq!(format_time(Duration::from_secs(3600)), "60:00");
    }
}
