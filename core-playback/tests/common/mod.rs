//! Shared fixtures: a scriptable engine and a harness around `SoundManager`.

#![allow(dead_code)]

use async_trait::async_trait;
use bridge_desktop::DesktopFocusProvider;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{
    AudioEngine, AudioSource, BridgeError, EngineHandle, PlaybackListener, PrepareListener,
    SourceResolver, StreamTarget,
};
use core_playback::{SessionKey, SoundManager};
use core_runtime::events::{EventBus, EventStream, SoundEvent};
use mockall::mock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const TRACK_LENGTH: Duration = Duration::from_millis(2_500);

#[derive(Default)]
pub struct FakePlayer {
    pub prepare: Option<Arc<dyn PrepareListener>>,
    pub playback: Vec<Arc<dyn PlaybackListener>>,
    pub target: Option<StreamTarget>,
    pub prepared_sync: bool,
    pub playing: bool,
    pub looping: bool,
    /// Set only through a native loop count.
    pub loop_count: Option<i32>,
    /// Set only through native pan.
    pub pan: Option<f32>,
    pub position: Duration,
    pub volume: (f32, f32),
    pub speed: f32,
    pub pitch: f32,
    pub released: bool,
}

/// Engine whose prepare signals are either delivered automatically from a
/// background thread or left for the test to fire.
pub struct FakeEngine {
    next_handle: AtomicU64,
    auto_prepare: bool,
    refuse_play: bool,
    native_controls: bool,
    channels: Option<u16>,
    players: Mutex<HashMap<u64, FakePlayer>>,
}

impl FakeEngine {
    /// Prepares every player on a background thread.
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            auto_prepare: true,
            refuse_play: false,
            native_controls: false,
            channels: None,
            players: Mutex::new(HashMap::new()),
        }
    }

    /// Leaves prepare signals to the test.
    pub fn manual() -> Self {
        Self {
            auto_prepare: false,
            ..Self::new()
        }
    }

    pub fn refusing_play() -> Self {
        Self {
            refuse_play: true,
            ..Self::new()
        }
    }

    /// Accepts pan and loop counts natively and reports `channels`.
    pub fn native(channels: u16) -> Self {
        Self {
            native_controls: true,
            channels: Some(channels),
            ..Self::new()
        }
    }

    pub fn with_player<R>(&self, handle: u64, f: impl FnOnce(&FakePlayer) -> R) -> R {
        let players = self.players.lock().unwrap();
        f(players.get(&handle).expect("unknown handle"))
    }

    pub fn target(&self, handle: u64) -> Option<StreamTarget> {
        self.with_player(handle, |p| p.target)
    }

    pub fn is_released(&self, handle: u64) -> bool {
        self.with_player(handle, |p| p.released)
    }

    pub fn prepare_listener(&self, handle: u64) -> Arc<dyn PrepareListener> {
        self.with_player(handle, |p| p.prepare.clone())
            .expect("prepare was not issued")
    }

    pub fn playback_listener(&self, handle: u64) -> Arc<dyn PlaybackListener> {
        self.with_player(handle, |p| p.playback.last().cloned())
            .expect("play was not issued")
    }

    pub fn signal_ready(&self, handle: u64) {
        self.prepare_listener(handle).on_ready();
    }

    pub fn signal_prepare_error(&self, handle: u64, code: i32, message: &str) {
        self.prepare_listener(handle)
            .on_error(code, message.to_string());
    }

    /// Natural end of stream for the latest `play`.
    pub fn finish(&self, handle: u64) {
        let listener = self.playback_listener(handle);
        self.mutate(handle, |p| {
            if !p.looping {
                p.playing = false;
            }
        });
        listener.on_completion();
    }

    pub fn fail_playback(&self, handle: u64, code: i32, message: &str) {
        let listener = self.playback_listener(handle);
        self.mutate(handle, |p| p.playing = false);
        listener.on_error(code, message.to_string());
    }

    /// Waits until the manager has issued prepare for `handle`.
    pub async fn wait_for_prepare(&self, handle: u64) {
        for _ in 0..1_000 {
            let issued = self
                .players
                .lock()
                .unwrap()
                .get(&handle)
                .map_or(false, |p| p.prepare.is_some());
            if issued {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("prepare never issued for handle {}", handle);
    }

    fn mutate(&self, handle: u64, f: impl FnOnce(&mut FakePlayer)) {
        let mut players = self.players.lock().unwrap();
        if let Some(player) = players.get_mut(&handle) {
            f(player);
        }
    }

    fn control(&self, handle: EngineHandle, f: impl FnOnce(&mut FakePlayer)) -> BridgeResult<()> {
        let mut players = self.players.lock().unwrap();
        match players.get_mut(&handle.raw()) {
            Some(player) if !player.released => {
                f(player);
                Ok(())
            }
            _ => Err(BridgeError::OperationFailed(format!(
                "player {} is not available",
                handle
            ))),
        }
    }
}

impl AudioEngine for FakeEngine {
    fn open(&self, _source: &AudioSource) -> BridgeResult<EngineHandle> {
        let raw = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.players.lock().unwrap().insert(
            raw,
            FakePlayer {
                volume: (1.0, 1.0),
                speed: 1.0,
                pitch: 1.0,
                ..FakePlayer::default()
            },
        );
        Ok(EngineHandle::new(raw))
    }

    fn set_stream_target(&self, handle: EngineHandle, target: StreamTarget) -> BridgeResult<()> {
        self.control(handle, |p| p.target = Some(target))
    }

    fn prepare_async(
        &self,
        handle: EngineHandle,
        listener: Arc<dyn PrepareListener>,
    ) -> BridgeResult<()> {
        self.control(handle, |p| p.prepare = Some(Arc::clone(&listener)))?;
        if self.auto_prepare {
            thread::spawn(move || listener.on_ready());
        }
        Ok(())
    }

    fn prepare_sync(
        &self,
        handle: EngineHandle,
        listener: Arc<dyn PrepareListener>,
    ) -> BridgeResult<()> {
        self.control(handle, |p| {
            p.prepare = Some(Arc::clone(&listener));
            p.prepared_sync = true;
        })?;
        listener.on_ready();
        Ok(())
    }

    fn play(&self, handle: EngineHandle, listener: Arc<dyn PlaybackListener>) -> BridgeResult<()> {
        if self.refuse_play {
            return Err(BridgeError::engine(-38, "play called in invalid state"));
        }
        self.control(handle, |p| {
            p.playback.push(listener);
            p.playing = true;
        })
    }

    fn pause(&self, handle: EngineHandle) -> BridgeResult<()> {
        self.control(handle, |p| p.playing = false)
    }

    fn seek(&self, handle: EngineHandle, position: Duration) -> BridgeResult<()> {
        self.control(handle, |p| p.position = position)
    }

    fn set_volume(&self, handle: EngineHandle, left: f32, right: f32) -> BridgeResult<()> {
        self.control(handle, |p| p.volume = (left, right))
    }

    fn set_looping(&self, handle: EngineHandle, looping: bool) -> BridgeResult<()> {
        self.control(handle, |p| p.looping = looping)
    }

    fn set_pan(&self, handle: EngineHandle, pan: f32) -> BridgeResult<()> {
        if !self.native_controls {
            return Err(BridgeError::NotAvailable("pan".to_string()));
        }
        self.control(handle, |p| p.pan = Some(pan))
    }

    fn set_loop_count(&self, handle: EngineHandle, loops: i32) -> BridgeResult<()> {
        if !self.native_controls {
            return self.set_looping(handle, loops != 0);
        }
        self.control(handle, |p| {
            p.loop_count = Some(loops);
            p.looping = loops < 0;
        })
    }

    fn set_speed(&self, handle: EngineHandle, speed: f32) -> BridgeResult<()> {
        self.control(handle, |p| p.speed = speed)
    }

    fn set_pitch(&self, handle: EngineHandle, pitch: f32) -> BridgeResult<()> {
        self.control(handle, |p| p.pitch = pitch)
    }

    fn reset(&self, handle: EngineHandle) -> BridgeResult<()> {
        self.control(handle, |p| {
            p.playing = false;
            p.position = Duration::ZERO;
        })
    }

    fn release(&self, handle: EngineHandle) -> BridgeResult<()> {
        self.control(handle, |p| {
            p.playing = false;
            p.released = true;
        })
    }

    fn duration(&self, _handle: EngineHandle) -> BridgeResult<Duration> {
        Ok(TRACK_LENGTH)
    }

    fn channel_count(&self, _handle: EngineHandle) -> Option<u16> {
        self.channels
    }

    fn position(&self, handle: EngineHandle) -> BridgeResult<Duration> {
        let players = self.players.lock().unwrap();
        players
            .get(&handle.raw())
            .map(|p| p.position)
            .ok_or_else(|| BridgeError::NotFound(handle.to_string()))
    }

    fn is_playing(&self, handle: EngineHandle) -> bool {
        self.players
            .lock()
            .unwrap()
            .get(&handle.raw())
            .map_or(false, |p| p.playing)
    }
}

mock! {
    pub Resolver {}

    #[async_trait]
    impl SourceResolver for Resolver {
        async fn resolve(&self, locator: &str) -> BridgeResult<AudioSource>;
    }
}

/// Resolver that treats `missing://` as unresolvable and everything else as
/// a local file or stream.
pub fn resolver() -> MockResolver {
    let mut resolver = MockResolver::new();
    resolver.expect_resolve().returning(|locator| {
        if locator.starts_with("missing://") {
            Err(BridgeError::NotFound(locator.to_string()))
        } else if locator.starts_with("http://") || locator.starts_with("https://") {
            Ok(AudioSource::RemoteStream {
                url: locator.to_string(),
            })
        } else {
            Ok(AudioSource::LocalFile {
                path: PathBuf::from(locator),
            })
        }
    });
    resolver
}

pub struct Harness {
    pub manager: SoundManager,
    pub engine: Arc<FakeEngine>,
    pub focus: Arc<DesktopFocusProvider>,
}

pub fn harness(engine: FakeEngine) -> Harness {
    let engine = Arc::new(engine);
    let focus = Arc::new(DesktopFocusProvider::new());
    let manager = SoundManager::new(
        engine.clone(),
        Arc::new(resolver()),
        focus.clone(),
        EventBus::new(64),
    );
    Harness {
        manager,
        engine,
        focus,
    }
}

pub fn key(raw: i64) -> SessionKey {
    SessionKey::new(raw)
}

/// Everything queued on `stream` right now.
pub fn drain(stream: &mut EventStream) -> Vec<SoundEvent> {
    let mut events = Vec::new();
    while let Some(Ok(event)) = stream.try_recv() {
        events.push(event);
    }
    events
}

pub fn play_change(raw: i64, is_playing: bool) -> SoundEvent {
    SoundEvent::PlayChange {
        key: key(raw),
        is_playing,
    }
}
