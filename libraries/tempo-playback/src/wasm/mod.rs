//! WASM bindings for tempo-playback
//!
//! Browser engine built on `HTMLAudioElement` plus a JavaScript-facing
//! wrapper around the [`PlaybackCoordinator`](crate::PlaybackCoordinator).

pub mod coordinator;
pub mod engine;
pub mod types;

pub use coordinator::WasmPlaybackCoordinator;
pub use engine::{HtmlAudioEngine, HtmlAudioFactory};
pub use types::WasmPlaybackState;
