//! Shared helpers for coordinator tests

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;
use tempo_playback::{
    volume, EngineError, EngineFactory, PlaybackConfig, PlaybackCoordinator, PlaybackEngine,
    PlaybackState, Subscriber, Ticket, Track,
};

static TRACING: Once = Once::new();

/// Route coordinator logs to the test harness (`RUST_LOG=tempo_playback=trace`)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Everything the mock engine was asked to do
#[derive(Debug, Default)]
pub struct EngineLog {
    pub created: usize,
    pub loads: Vec<(String, Ticket)>,
    pub plays: Vec<Ticket>,
    pub pauses: usize,
    pub seeks: Vec<Duration>,
    pub volume: f32,
    pub muted: bool,

    // Failure injection
    pub fail_create: bool,
    pub fail_load: bool,
    pub fail_seek: bool,
}

impl EngineLog {
    /// Gain the element would actually apply
    pub fn output_gain(&self) -> f32 {
        volume::output_gain(self.volume, self.muted)
    }

    /// Ticket of the most recent load
    pub fn load_ticket(&self) -> Ticket {
        self.loads.last().expect("nothing loaded").1
    }

    /// Ticket of the most recent play request
    pub fn play_ticket(&self) -> Ticket {
        *self.plays.last().expect("nothing played")
    }

    /// URLs loaded so far, in order
    pub fn loaded_urls(&self) -> Vec<String> {
        self.loads.iter().map(|(url, _)| url.clone()).collect()
    }
}

pub type SharedLog = Rc<RefCell<EngineLog>>;

pub struct MockEngine {
    log: SharedLog,
}

impl PlaybackEngine for MockEngine {
    fn load(&mut self, url: &str, ticket: Ticket) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_load {
            return Err(EngineError::Load(format!("unreachable: {url}")));
        }
        log.loads.push((url.to_string(), ticket));
        Ok(())
    }

    fn play(&mut self, ticket: Ticket) -> Result<(), EngineError> {
        self.log.borrow_mut().plays.push(ticket);
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().pauses += 1;
    }

    fn seek(&mut self, position: Duration) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_seek {
            return Err(EngineError::Seek(format!("not seekable: {position:?}")));
        }
        log.seeks.push(position);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.borrow_mut().volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.borrow_mut().muted = muted;
    }
}

pub struct MockFactory {
    log: SharedLog,
}

impl EngineFactory for MockFactory {
    type Engine = MockEngine;

    fn create(&mut self) -> Result<MockEngine, EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_create {
            return Err(EngineError::Unavailable("no audio output".to_string()));
        }
        log.created += 1;
        Ok(MockEngine {
            log: Rc::clone(&self.log),
        })
    }
}

pub type TestPlayer = PlaybackCoordinator<MockFactory>;

/// Coordinator with a mock engine and a fixed shuffle seed
pub fn player_with(config: PlaybackConfig) -> (TestPlayer, SharedLog) {
    init_tracing();
    let log = SharedLog::default();
    let factory = MockFactory {
        log: Rc::clone(&log),
    };
    let player = PlaybackCoordinator::with_rng(config, factory, StdRng::seed_from_u64(42));
    (player, log)
}

pub fn player() -> (TestPlayer, SharedLog) {
    player_with(PlaybackConfig::default())
}

/// Subscriber that keeps every snapshot it receives
pub fn recorder() -> (Subscriber, Rc<RefCell<Vec<PlaybackState>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscriber: Subscriber =
        Box::new(move |state: &PlaybackState| sink.borrow_mut().push(state.clone()));
    (subscriber, seen)
}

pub fn track(id: &str) -> Track {
    Track::new(
        id,
        format!("Song {id}"),
        format!("Artist {id}"),
        url(id),
    )
    .with_duration(Duration::from_secs(180))
}

pub fn url(id: &str) -> String {
    format!("https://cdn.test/{id}.mp3")
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

/// Id of the current track, if any
pub fn current_id(player: &TestPlayer) -> Option<String> {
    player
        .state()
        .current_track
        .as_ref()
        .map(|t| t.id.as_str().to_string())
}
