//! Error types for the audio engine binding

use thiserror::Error;

/// Failures reported by a [`PlaybackEngine`](crate::PlaybackEngine).
///
/// The coordinator never hands these to its callers. Each one is folded
/// into the idle state and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No output handle could be created
    #[error("Audio engine unavailable: {0}")]
    Unavailable(String),

    /// Media could not be fetched or decoded
    #[error("Failed to load media: {0}")]
    Load(String),

    /// Playback could not start (autoplay blocked, aborted, ...)
    #[error("Playback rejected: {0}")]
    Play(String),

    /// The engine refused a seek
    #[error("Seek failed: {0}")]
    Seek(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
