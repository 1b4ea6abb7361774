//! Tempo Player - Playback Coordination
//!
//! Platform-agnostic playback coordination for Tempo Player.
//!
//! This crate provides:
//! - One shared playback record observed by every UI surface
//! - Subscribe/unsubscribe with immediate delivery of the current state
//! - Queue navigation (next/previous) under shuffle and repeat modes
//! - Volume and mute control (0.0-1.0, mute keeps the stored volume)
//! - Seek by time and by percentage
//! - Staleness guards so late engine events never clobber a newer load
//!
//! # Architecture
//!
//! `tempo-playback` never touches an audio primitive directly:
//! - Commands go out through the [`PlaybackEngine`] trait
//! - What the engine actually did comes back as [`EngineEvent`]s
//! - The `wasm` feature provides an `HtmlAudioElement` engine and a
//!   JavaScript-facing wrapper
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use std::time::Duration;
//! use tempo_playback::{
//!     EngineError, PlaybackConfig, PlaybackCoordinator, PlaybackEngine, PlaybackState, Ticket,
//!     Track,
//! };
//!
//! struct SilentEngine;
//!
//! impl PlaybackEngine for SilentEngine {
//!     fn load(&mut self, _url: &str, _ticket: Ticket) -> Result<(), EngineError> {
//!         Ok(())
//!     }
//!     fn play(&mut self, _ticket: Ticket) -> Result<(), EngineError> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration) -> Result<(), EngineError> {
//!         Ok(())
//!     }
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//! }
//!
//! let mut player = PlaybackCoordinator::new(PlaybackConfig::default(), || {
//!     Ok::<_, EngineError>(SilentEngine)
//! });
//!
//! let id = player.subscribe(Box::new(|state: &PlaybackState| {
//!     println!("playing: {}", state.is_playing);
//! }));
//!
//! let track = Track::new("1", "Song", "Artist", "https://cdn.example/1.mp3");
//! player.load_and_play(track, Vec::new());
//! assert!(player.state().is_loading);
//!
//! player.set_volume(0.5);
//! player.unsubscribe(id);
//! ```

mod coordinator;
mod engine;
mod error;
pub mod queue;
mod subscribers;
pub mod types;
pub mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use coordinator::PlaybackCoordinator;
pub use engine::{EngineEvent, EngineFactory, PlaybackEngine, Ticket};
pub use error::{EngineError, Result};
pub use queue::Direction;
pub use subscribers::{Subscriber, SubscriberRegistry, SubscriptionId};
pub use tempo_core::{RepeatMode, Track};
pub use types::{duration_from_secs, format_time, PlaybackConfig, PlaybackState};
