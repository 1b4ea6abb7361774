//! Playback coordinator - core orchestration
//!
//! Owns the shared [`PlaybackState`], the single engine handle and the
//! subscriber registry. Commands mutate state synchronously, engine events
//! are folded in as they arrive, and every change goes out to subscribers
//! through one `notify` path.

use crate::{
    engine::{EngineEvent, EngineFactory, PlaybackEngine, Ticket, TicketCounter},
    error::{EngineError, Result},
    queue::{self, Direction},
    subscribers::{Subscriber, SubscriberRegistry, SubscriptionId},
    types::{PlaybackConfig, PlaybackState},
    volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tempo_core::{RepeatMode, Track};
use tracing::{debug, info, trace, warn};

/// Central playback coordination
///
/// Construct exactly one per application (the composition root owns it)
/// and hand it to UI surfaces by reference. It is single-threaded: engine
/// events are delivered on the same thread as commands.
///
/// Subscribers run while the coordinator is mutably borrowed, so they must
/// not issue commands from inside their callback. Queue the command and
/// issue it once the callback has returned.
pub struct PlaybackCoordinator<F: EngineFactory> {
    state: PlaybackState,
    subscribers: SubscriberRegistry,

    // Engine
    factory: F,
    engine: Option<F::Engine>,

    // Staleness guards for asynchronous engine confirmations
    tickets: TicketCounter,
    load_ticket: Option<Ticket>,
    play_ticket: Option<Ticket>,

    // Shuffle selection
    rng: StdRng,
}

impl<F: EngineFactory> PlaybackCoordinator<F> {
    /// Create a coordinator; the engine is created on first use
    pub fn new(config: PlaybackConfig, factory: F) -> Self {
        Self::with_rng(config, factory, StdRng::from_entropy())
    }

    /// Create a coordinator with a fixed shuffle source
    pub fn with_rng(config: PlaybackConfig, factory: F, rng: StdRng) -> Self {
        Self {
            state: PlaybackState::new(&config),
            subscribers: SubscriberRegistry::new(),
            factory,
            engine: None,
            tickets: TicketCounter::default(),
            load_ticket: None,
            play_ticket: None,
            rng,
        }
    }

    // ===== Subscribers =====

    /// Register a subscriber
    ///
    /// The subscriber receives the current state before this returns, then
    /// one snapshot per change. The first registration creates the engine.
    pub fn subscribe(&mut self, mut subscriber: Subscriber) -> SubscriptionId {
        if let Err(err) = self.ensure_engine() {
            warn!("Audio engine unavailable: {}", err);
        }

        let snapshot = self.state.clone();
        subscriber(&snapshot);

        let id = self.subscribers.insert(subscriber);
        debug!(
            "Subscriber {} registered ({} active)",
            id.get(),
            self.subscribers.len()
        );
        id
    }

    /// Remove a subscriber
    ///
    /// Idempotent. The engine keeps running even when the last subscriber
    /// leaves.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(id);
        if removed {
            debug!(
                "Subscriber {} removed ({} active)",
                id.get(),
                self.subscribers.len()
            );
        }
        removed
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // ===== Playback Control =====

    /// Load a track and start playing it within `queue`
    ///
    /// An empty `queue` becomes `[track]`. Subscribers see the new track in
    /// the loading state before the engine is asked for anything.
    pub fn load_and_play(&mut self, track: Track, queue: Vec<Track>) {
        let queue = if queue.is_empty() {
            vec![track.clone()]
        } else {
            queue
        };
        let index = queue::position_of(&queue, &track);
        let url = track.audio_url.clone();

        debug!(
            "Loading '{}' by {} ({} of {})",
            track.name,
            track.artist,
            index + 1,
            queue.len()
        );

        self.state.current_track = Some(track);
        self.state.queue = queue;
        self.state.current_index = Some(index);
        self.state.current_time = Duration::ZERO;
        self.state.duration = Duration::ZERO;
        self.state.is_loading = true;
        self.state.is_playing = false;

        let ticket = self.tickets.issue();
        self.load_ticket = Some(ticket);
        self.play_ticket = Some(ticket);
        self.notify();

        let issued = self.ensure_engine().and_then(|engine| {
            engine.load(&url, ticket)?;
            engine.play(ticket)
        });
        if let Err(err) = issued {
            self.fold_failure(&err.to_string());
        }
    }

    /// Pause when playing, otherwise request a resume
    ///
    /// Pausing takes effect immediately. A resume only marks the state as
    /// playing once the engine confirms it.
    pub fn toggle_play_pause(&mut self) {
        if self.state.current_track.is_none() {
            return;
        }

        if self.state.is_playing {
            if let Some(engine) = self.engine.as_mut() {
                engine.pause();
            }
            self.play_ticket = None;
            self.state.is_playing = false;
            debug!("Paused");
            self.notify();
            return;
        }

        let ticket = self.tickets.issue();
        self.play_ticket = Some(ticket);
        debug!("Resume requested");

        let issued = self.ensure_engine().and_then(|engine| engine.play(ticket));
        if let Err(err) = issued {
            self.fold_failure(&err.to_string());
        }
    }

    /// Skip to the next track
    pub fn next(&mut self) {
        self.step(Direction::Forward);
    }

    /// Go back to the previous track
    ///
    /// Under shuffle this is another random pick, not history navigation.
    pub fn previous(&mut self) {
        self.step(Direction::Backward);
    }

    /// Load the track a step lands on; returns false for a no-op
    fn step(&mut self, direction: Direction) -> bool {
        let Some(target) = self.state.navigation_target(direction) else {
            debug!("No {:?} target in queue of {}", direction, self.state.queue.len());
            return false;
        };

        let index = queue::resolve(target, self.state.queue.len(), &mut self.rng);
        let Some(track) = self.state.queue.get(index).cloned() else {
            return false;
        };

        let queue = self.state.queue.clone();
        self.load_and_play(track, queue);
        true
    }

    // ===== Seek =====

    /// Seek within the current track
    ///
    /// The position is reported optimistically; the engine clamps on its
    /// side as well.
    pub fn seek(&mut self, position: Duration) {
        if self.state.current_track.is_none() {
            return;
        }

        let position = if self.state.duration.is_zero() {
            position
        } else {
            position.min(self.state.duration)
        };

        self.state.current_time = position;
        self.notify();

        if let Some(engine) = self.engine.as_mut() {
            if let Err(err) = engine.seek(position) {
                warn!("Seek to {:?} failed: {}", position, err);
            }
        }
    }

    /// Seek by fraction of the track (0.0 - 1.0)
    ///
    /// Ignored while the duration is still unknown.
    pub fn seek_to_percent(&mut self, percent: f32) {
        if self.state.duration.is_zero() {
            return;
        }
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0)
        };
        self.seek(self.state.duration.mul_f32(percent));
    }

    // ===== Volume =====

    /// Set volume (0.0 - 1.0); zero also mutes, anything else unmutes
    pub fn set_volume(&mut self, level: f32) {
        let level = volume::clamp(level);
        self.state.volume = level;
        self.state.is_muted = level == 0.0;

        if let Some(engine) = self.engine.as_mut() {
            engine.set_volume(level);
            engine.set_muted(self.state.is_muted);
        }
        self.notify();
    }

    /// Silence output, or restore the stored volume
    pub fn toggle_mute(&mut self) {
        self.state.is_muted = !self.state.is_muted;

        if let Some(engine) = self.engine.as_mut() {
            if self.state.is_muted {
                engine.set_muted(true);
            } else {
                engine.set_volume(self.state.volume);
                engine.set_muted(false);
            }
        }
        self.notify();
    }

    // ===== Shuffle and Repeat =====

    /// Flip shuffle; the queue order is left alone
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.state.is_shuffled);
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, shuffled: bool) {
        self.state.is_shuffled = shuffled;
        self.notify();
    }

    /// Advance repeat mode: off -> one -> all -> off
    pub fn cycle_repeat(&mut self) {
        self.set_repeat_mode(self.state.repeat_mode.cycled());
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.state.repeat_mode = mode;
        self.notify();
    }

    // ===== Engine Events =====

    /// Fold an engine event into the shared state
    ///
    /// Events carrying a ticket other than the current load (or pending
    /// play request) are stale and dropped without touching state.
    pub fn handle_event(&mut self, event: EngineEvent) {
        if !self.is_current(&event) {
            trace!("Discarding stale engine event {:?}", event);
            return;
        }

        match event {
            EngineEvent::TimeUpdate {
                position, duration, ..
            } => {
                self.state.current_time = position;
                if let Some(duration) = duration {
                    self.state.duration = duration;
                }
            }
            EngineEvent::DurationChanged { duration, .. } => {
                self.state.duration = duration;
            }
            EngineEvent::LoadStarted { .. } => {
                self.state.is_loading = true;
            }
            EngineEvent::ReadyToPlay {
                position, duration, ..
            } => {
                self.state.is_loading = false;
                self.state.current_time = position;
                if self.state.duration.is_zero() {
                    if let Some(duration) = duration {
                        self.state.duration = duration;
                    }
                }
            }
            EngineEvent::PlaybackStarted { .. } => {
                self.play_ticket = None;
                self.state.is_playing = true;
                self.state.is_loading = false;
                debug!("Playback started");
            }
            EngineEvent::PlayRejected { reason, .. } => {
                self.fold_failure(&reason);
                return;
            }
            EngineEvent::Error { message, .. } => {
                self.fold_failure(&message);
                return;
            }
            EngineEvent::Ended { .. } => {
                debug!("Track ended");
                self.play_ticket = None;
                self.state.is_playing = false;
                if !self.step(Direction::Forward) {
                    self.notify();
                }
                return;
            }
        }

        self.notify();
    }

    fn is_current(&self, event: &EngineEvent) -> bool {
        let expected = if event.is_play_outcome() {
            self.play_ticket
        } else {
            self.load_ticket
        };
        expected == Some(event.ticket())
    }

    /// Go idle after a load, decode or play failure; the track stays current
    fn fold_failure(&mut self, message: &str) {
        let name = self
            .state
            .current_track
            .as_ref()
            .map_or("<none>", |t| t.name.as_str());
        warn!("Playback failed for '{}': {}", name, message);

        self.play_ticket = None;
        self.state.is_loading = false;
        self.state.is_playing = false;
        self.notify();
    }

    // ===== State Queries =====

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Whether the engine handle exists
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// The engine handle, once created
    pub fn engine(&self) -> Option<&F::Engine> {
        self.engine.as_ref()
    }

    // ===== Internal =====

    fn ensure_engine(&mut self) -> Result<&mut F::Engine> {
        if self.engine.is_none() {
            let mut engine = self.factory.create()?;
            engine.set_volume(self.state.volume);
            engine.set_muted(self.state.is_muted);
            info!("Audio engine created");
            self.engine = Some(engine);
        }

        self.engine
            .as_mut()
            .ok_or_else(|| EngineError::Unavailable("engine not created".to_string()))
    }

    /// Push a snapshot of the current state to every subscriber
    fn notify(&mut self) {
        let snapshot = self.state.clone();
        self.subscribers.dispatch(&snapshot);
    }
}
