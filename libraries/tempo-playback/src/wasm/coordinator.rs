//! WASM-compatible PlaybackCoordinator wrapper

use super::engine::{EventSink, HtmlAudioFactory};
use super::types::WasmPlaybackState;
use crate::{EngineEvent, PlaybackConfig, PlaybackCoordinator, PlaybackState, SubscriptionId, Track};
use js_sys::Function;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tempo_core::{PlaybackSettings, TrackSnapshot};
use tracing::warn;
use wasm_bindgen::prelude::*;

type Coordinator = PlaybackCoordinator<HtmlAudioFactory>;

/// Coordinator plus engine events that arrived while it was busy
struct Shared {
    coordinator: RefCell<Coordinator>,
    backlog: RefCell<VecDeque<EngineEvent>>,
}

impl Shared {
    fn deliver(&self, event: EngineEvent) {
        self.backlog.borrow_mut().push_back(event);
        self.drain();
    }

    /// Fold queued events unless a command or notification is in progress
    fn drain(&self) {
        loop {
            let Ok(mut coordinator) = self.coordinator.try_borrow_mut() else {
                return;
            };
            let Some(event) = self.backlog.borrow_mut().pop_front() else {
                return;
            };
            coordinator.handle_event(event);
        }
    }
}

/// WASM-compatible playback coordinator
///
/// Create one per page and pass it to every component. Subscriber
/// callbacks must not call back into the coordinator synchronously; such
/// calls are rejected.
#[wasm_bindgen]
pub struct WasmPlaybackCoordinator {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WasmPlaybackCoordinator {
    /// Create a coordinator with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::build(PlaybackConfig::default())
    }

    /// Create a coordinator from `{ volume, shuffle, repeat }`
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(settings: JsValue) -> Result<WasmPlaybackCoordinator, JsValue> {
        let settings: PlaybackSettings = serde_wasm_bindgen::from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid playback settings: {}", e)))?;
        Ok(Self::build(PlaybackConfig::from(&settings)))
    }

    fn build(config: PlaybackConfig) -> Self {
        console_error_panic_hook::set_once();

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            let sink: EventSink = Rc::new(move |event| {
                if let Some(shared) = weak.upgrade() {
                    shared.deliver(event);
                }
            });

            Shared {
                coordinator: RefCell::new(PlaybackCoordinator::new(
                    config,
                    HtmlAudioFactory::new(sink),
                )),
                backlog: RefCell::default(),
            }
        });

        Self { shared }
    }

    // ===== Subscribers =====

    /// Register `callback(state)`; it fires immediately with the current state
    pub fn subscribe(&self, callback: Function) -> Result<f64, JsValue> {
        let id = self.command(move |c| {
            c.subscribe(Box::new(move |state: &PlaybackState| {
                let value = to_js(&WasmPlaybackState::from(state));
                if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                    warn!("Subscriber threw: {:?}", err);
                }
            }))
        })?;
        Ok(id.get() as f64)
    }

    /// Remove a subscriber; unknown ids are ignored
    pub fn unsubscribe(&self, id: f64) -> Result<(), JsValue> {
        self.command(|c| {
            c.unsubscribe(SubscriptionId::from(id as u64));
        })
    }

    // ===== Playback Control =====

    /// Play `track` within `queue` (catalog JSON shape; queue may be omitted)
    #[wasm_bindgen(js_name = loadAndPlay)]
    pub fn load_and_play(&self, track: JsValue, queue: JsValue) -> Result<(), JsValue> {
        let track: TrackSnapshot = serde_wasm_bindgen::from_value(track)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse track: {}", e)))?;
        let queue: Option<Vec<TrackSnapshot>> = serde_wasm_bindgen::from_value(queue)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse queue: {}", e)))?;

        let queue: Vec<Track> = queue
            .unwrap_or_default()
            .into_iter()
            .map(Track::from)
            .collect();
        self.command(|c| c.load_and_play(Track::from(track), queue))
    }

    /// Pause or resume
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) -> Result<(), JsValue> {
        self.command(|c| c.toggle_play_pause())
    }

    /// Skip to next track
    pub fn next(&self) -> Result<(), JsValue> {
        self.command(|c| c.next())
    }

    /// Go to previous track
    pub fn previous(&self) -> Result<(), JsValue> {
        self.command(|c| c.previous())
    }

    // ===== Seeking =====

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, position_secs: f64) -> Result<(), JsValue> {
        let position = crate::duration_from_secs(position_secs);
        self.command(|c| c.seek(position))
    }

    /// Seek to position by percentage (0.0 - 1.0)
    #[wasm_bindgen(js_name = seekToPercent)]
    pub fn seek_to_percent(&self, percent: f32) -> Result<(), JsValue> {
        self.command(|c| c.seek_to_percent(percent))
    }

    // ===== Volume Control =====

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) -> Result<(), JsValue> {
        self.command(|c| c.set_volume(volume))
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) -> Result<(), JsValue> {
        self.command(|c| c.toggle_mute())
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) -> Result<(), JsValue> {
        self.command(|c| c.toggle_shuffle())
    }

    /// Cycle repeat mode: off -> one -> all -> off
    #[wasm_bindgen(js_name = cycleRepeat)]
    pub fn cycle_repeat(&self) -> Result<(), JsValue> {
        self.command(|c| c.cycle_repeat())
    }

    // ===== State Queries =====

    /// Current state snapshot
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        self.command(|c| to_js(&WasmPlaybackState::from(c.state())))
    }

    // ===== Internal =====

    fn command<T>(&self, f: impl FnOnce(&mut Coordinator) -> T) -> Result<T, JsValue> {
        let result = {
            let mut coordinator = self.shared.coordinator.try_borrow_mut().map_err(|_| {
                JsValue::from_str("Playback command issued from inside a subscriber callback")
            })?;
            f(&mut *coordinator)
        };
        self.shared.drain();
        Ok(result)
    }
}

impl Default for WasmPlaybackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as `m:ss`
#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(secs: f64) -> String {
    crate::format_time(crate::duration_from_secs(secs))
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}
