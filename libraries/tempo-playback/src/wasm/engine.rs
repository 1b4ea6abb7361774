//! `HTMLAudioElement` playback engine

use crate::{
    duration_from_secs, EngineError, EngineEvent, EngineFactory, PlaybackEngine, Result, Ticket,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlAudioElement};

/// Where the engine reports what the element did
pub type EventSink = Rc<dyn Fn(EngineEvent)>;

type Listener = Closure<dyn FnMut(Event)>;

/// Creates the single page-wide audio element
pub struct HtmlAudioFactory {
    sink: EventSink,
}

impl HtmlAudioFactory {
    pub fn new(sink: EventSink) -> Self {
        Self { sink }
    }
}

impl EngineFactory for HtmlAudioFactory {
    type Engine = HtmlAudioEngine;

    fn create(&mut self) -> Result<HtmlAudioEngine> {
        HtmlAudioEngine::new(Rc::clone(&self.sink))
    }
}

/// Engine backed by one detached `<audio>` element
///
/// Media events are tagged with the ticket of the most recent `load`.
pub struct HtmlAudioEngine {
    audio: HtmlAudioElement,
    current: Rc<Cell<Option<Ticket>>>,
    sink: EventSink,
    // Held so the callbacks outlive registration
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlAudioEngine {
    fn new(sink: EventSink) -> Result<Self> {
        let audio =
            HtmlAudioElement::new().map_err(|e| EngineError::Unavailable(describe(&e)))?;
        audio.set_preload("metadata");

        let mut engine = Self {
            audio,
            current: Rc::new(Cell::new(None)),
            sink,
            listeners: Vec::new(),
        };

        engine.listen("loadstart", |_, ticket| {
            Some(EngineEvent::LoadStarted { ticket })
        })?;
        engine.listen("timeupdate", |audio, ticket| {
            Some(EngineEvent::TimeUpdate {
                ticket,
                position: position(audio),
                duration: known_duration(audio.duration()),
            })
        })?;
        for kind in ["durationchange", "loadedmetadata"] {
            engine.listen(kind, |audio, ticket| {
                known_duration(audio.duration())
                    .map(|duration| EngineEvent::DurationChanged { ticket, duration })
            })?;
        }
        engine.listen("canplay", |audio, ticket| {
            Some(EngineEvent::ReadyToPlay {
                ticket,
                position: position(audio),
                duration: known_duration(audio.duration()),
            })
        })?;
        engine.listen("ended", |_, ticket| Some(EngineEvent::Ended { ticket }))?;
        engine.listen("error", |audio, ticket| {
            let message = audio.error().map_or_else(
                || "unknown media error".to_string(),
                |e| format!("media error {}: {}", e.code(), e.message()),
            );
            Some(EngineEvent::Error { ticket, message })
        })?;

        info!("HTML audio element ready");
        Ok(engine)
    }

    fn listen(
        &mut self,
        kind: &'static str,
        map: impl Fn(&HtmlAudioElement, Ticket) -> Option<EngineEvent> + 'static,
    ) -> Result<()> {
        let audio = self.audio.clone();
        let current = Rc::clone(&self.current);
        let sink = Rc::clone(&self.sink);

        let listener = Listener::new(move |_event: Event| {
            if let Some(event) = current.get().and_then(|ticket| map(&audio, ticket)) {
                sink(event);
            }
        });

        self.audio
            .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            .map_err(|e| EngineError::Unavailable(describe(&e)))?;
        self.listeners.push((kind, listener));
        Ok(())
    }
}

impl PlaybackEngine for HtmlAudioEngine {
    fn load(&mut self, url: &str, ticket: Ticket) -> Result<()> {
        if url.is_empty() {
            return Err(EngineError::Load("track has no media URL".to_string()));
        }
        self.current.set(Some(ticket));
        self.audio.set_src(url);
        self.audio.load();
        Ok(())
    }

    fn play(&mut self, ticket: Ticket) -> Result<()> {
        let promise = self
            .audio
            .play()
            .map_err(|e| EngineError::Play(describe(&e)))?;
        let sink = Rc::clone(&self.sink);

        spawn_local(async move {
            let event = match JsFuture::from(promise).await {
                Ok(_) => EngineEvent::PlaybackStarted { ticket },
                Err(err) => EngineEvent::PlayRejected {
                    ticket,
                    reason: describe(&err),
                },
            };
            sink(event);
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            warn!("pause() failed: {}", describe(&err));
        }
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        if self.current.get().is_none() {
            return Err(EngineError::Seek("no media loaded".to_string()));
        }
        self.audio.set_current_time(position.as_secs_f64());
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(f64::from(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }
}

impl Drop for HtmlAudioEngine {
    fn drop(&mut self) {
        for (kind, listener) in &self.listeners {
            let _ = self
                .audio
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}

/// NaN while unknown, +Inf for live streams
fn known_duration(secs: f64) -> Option<Duration> {
    (secs.is_finite() && secs > 0.0).then(|| duration_from_secs(secs))
}

fn position(audio: &HtmlAudioElement) -> Duration {
    duration_from_secs(audio.current_time())
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
