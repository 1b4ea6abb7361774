//! Platform-agnostic audio engine binding
//!
//! The coordinator drives a single output handle through [`PlaybackEngine`]
//! and learns what the handle actually did through [`EngineEvent`]s the
//! platform feeds back via
//! [`PlaybackCoordinator::handle_event`](crate::PlaybackCoordinator::handle_event).
//!
//! Every operation whose outcome arrives later carries a [`Ticket`]. The
//! engine echoes it on the matching events so the coordinator can drop
//! confirmations that belong to a superseded load or play request.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation number attached to an asynchronous engine operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw generation value
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Issues strictly increasing tickets
#[derive(Debug, Default)]
pub(crate) struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

/// Single-stream audio output
///
/// Implementors wrap the platform primitive (an `HTMLAudioElement` in the
/// browser, a native player elsewhere). Calls must not block: anything
/// slow completes later and is reported as an [`EngineEvent`].
pub trait PlaybackEngine {
    /// Replace the source and begin loading it
    ///
    /// Media events for this source carry `ticket` until the next `load`.
    fn load(&mut self, url: &str, ticket: Ticket) -> Result<()>;

    /// Request playback of the loaded source
    ///
    /// The outcome arrives as [`EngineEvent::PlaybackStarted`] or
    /// [`EngineEvent::PlayRejected`] carrying `ticket`.
    fn play(&mut self, ticket: Ticket) -> Result<()>;

    /// Pause output; assumed to take effect immediately
    fn pause(&mut self);

    /// Move the playhead; the engine clamps to the media length
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Apply a linear volume in `[0, 1]`
    fn set_volume(&mut self, volume: f32);

    /// Silence or restore output without changing the volume
    fn set_muted(&mut self, muted: bool);
}

/// Creates the process-wide engine handle on first use
pub trait EngineFactory {
    /// Engine type produced by this factory
    type Engine: PlaybackEngine;

    /// Create the output handle
    fn create(&mut self) -> Result<Self::Engine>;
}

impl<E, F> EngineFactory for F
where
    E: PlaybackEngine,
    F: FnMut() -> Result<E>,
{
    type Engine = E;

    fn create(&mut self) -> Result<E> {
        self()
    }
}

/// Normalized engine signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Playhead advanced
    TimeUpdate {
        ticket: Ticket,
        position: Duration,
        /// `None` while the media length is unknown
        duration: Option<Duration>,
    },

    /// Media length became known or changed
    DurationChanged { ticket: Ticket, duration: Duration },

    /// The engine began fetching the source
    LoadStarted { ticket: Ticket },

    /// Enough data is buffered to start playing
    ReadyToPlay {
        ticket: Ticket,
        position: Duration,
        duration: Option<Duration>,
    },

    /// A play request succeeded and audio is flowing
    PlaybackStarted { ticket: Ticket },

    /// A play request was refused (autoplay policy, aborted by a new load, ...)
    PlayRejected { ticket: Ticket, reason: String },

    /// The source played to its end
    Ended { ticket: Ticket },

    /// Fatal network or decode error for the source
    Error { ticket: Ticket, message: String },
}

impl EngineEvent {
    /// Ticket of the operation this event belongs to
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::TimeUpdate { ticket, .. }
            | Self::DurationChanged { ticket, .. }
            | Self::LoadStarted { ticket }
            | Self::ReadyToPlay { ticket, .. }
            | Self::PlaybackStarted { ticket }
            | Self::PlayRejected { ticket, .. }
            | Self::Ended { ticket }
            | Self::Error { ticket, .. } => *ticket,
        }
    }

    /// Whether this answers a play request rather than describing the media
    pub fn is_play_outcome(&self) -> bool {
        matches!(
            self,
            Self::PlaybackStarted { .. } | Self::PlayRejected { .. }
        )
    }
}
