//! End-to-end tests through `SoundService` with desktop bridges and an
//! engine that prepares instantly.

use async_trait::async_trait;
use bridge_desktop::{DesktopRouteMonitor, DesktopSystemAudio};
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{
    AudioEngine, AudioSource, BridgeError, EngineHandle, PlaybackListener, PrepareListener,
    StreamTarget, SystemAudioControl,
};
use core_service::{
    CreateOptions, CreatePayload, ErrorPayload, SessionKey, SoundConfig, SoundEvent, SoundService,
};
use mockall::mock;
use mockall::predicate::eq;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const CLIP_LENGTH: Duration = Duration::from_millis(1_200);

/// Prepares on the calling thread and keeps only the playing flag.
#[derive(Default)]
struct InstantEngine {
    next: AtomicU64,
    playing: Mutex<HashMap<u64, bool>>,
    released: Mutex<Vec<u64>>,
}

impl AudioEngine for InstantEngine {
    fn open(&self, _source: &AudioSource) -> BridgeResult<EngineHandle> {
        let raw = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.playing.lock().unwrap().insert(raw, false);
        Ok(EngineHandle::new(raw))
    }

    fn set_stream_target(&self, _: EngineHandle, _: StreamTarget) -> BridgeResult<()> {
        Ok(())
    }

    fn prepare_async(
        &self,
        _handle: EngineHandle,
        listener: Arc<dyn PrepareListener>,
    ) -> BridgeResult<()> {
        listener.on_ready();
        Ok(())
    }

    fn play(&self, handle: EngineHandle, _: Arc<dyn PlaybackListener>) -> BridgeResult<()> {
        self.playing.lock().unwrap().insert(handle.raw(), true);
        Ok(())
    }

    fn pause(&self, handle: EngineHandle) -> BridgeResult<()> {
        self.playing.lock().unwrap().insert(handle.raw(), false);
        Ok(())
    }

    fn seek(&self, _: EngineHandle, _: Duration) -> BridgeResult<()> {
        Ok(())
    }

    fn set_volume(&self, _: EngineHandle, _: f32, _: f32) -> BridgeResult<()> {
        Ok(())
    }

    fn set_looping(&self, _: EngineHandle, _: bool) -> BridgeResult<()> {
        Ok(())
    }

    fn set_speed(&self, _: EngineHandle, _: f32) -> BridgeResult<()> {
        Ok(())
    }

    fn set_pitch(&self, _: EngineHandle, _: f32) -> BridgeResult<()> {
        Ok(())
    }

    fn reset(&self, _: EngineHandle) -> BridgeResult<()> {
        Ok(())
    }

    fn release(&self, handle: EngineHandle) -> BridgeResult<()> {
        self.released.lock().unwrap().push(handle.raw());
        Ok(())
    }

    fn duration(&self, _: EngineHandle) -> BridgeResult<Duration> {
        Ok(CLIP_LENGTH)
    }

    fn position(&self, _: EngineHandle) -> BridgeResult<Duration> {
        Ok(Duration::ZERO)
    }

    fn is_playing(&self, handle: EngineHandle) -> bool {
        self.playing
            .lock()
            .unwrap()
            .get(&handle.raw())
            .copied()
            .unwrap_or(false)
    }
}

mock! {
    pub Mixer {}

    #[async_trait]
    impl SystemAudioControl for Mixer {
        async fn stream_volume(&self) -> BridgeResult<f32>;
        async fn set_stream_volume(&self, value: f32) -> BridgeResult<()>;
        async fn set_speakerphone(&self, on: bool) -> BridgeResult<()>;
    }
}

/// Fresh resource directory holding a few empty clips.
fn sounds_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sound-service-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    for name in ["click.wav", "loop.ogg", "voice.wav", "song.mp3"] {
        std::fs::write(dir.join(name), b"").unwrap();
    }
    dir
}

struct Fixture {
    service: SoundService,
    engine: Arc<InstantEngine>,
    route: Arc<DesktopRouteMonitor>,
    mixer: Arc<DesktopSystemAudio>,
}

async fn fixture() -> Fixture {
    let engine = Arc::new(InstantEngine::default());
    let route = Arc::new(DesktopRouteMonitor::new());
    let mixer = Arc::new(DesktopSystemAudio::with_volume(0.5));
    let config = SoundConfig::builder()
        .engine(engine.clone())
        .route_monitor(route.clone())
        .system_audio(mixer.clone())
        .resource_root(sounds_dir())
        .build()
        .unwrap();
    let service = SoundService::bootstrap(config).await.unwrap();
    Fixture {
        service,
        engine,
        route,
        mixer,
    }
}

fn key(raw: i64) -> SessionKey {
    SessionKey::new(raw)
}

#[tokio::test]
async fn test_create_reports_duration_payload() {
    let f = fixture().await;

    let payload = f
        .service
        .create(key(1), "click.wav", CreateOptions::default())
        .await;

    assert_eq!(
        payload,
        CreatePayload::Prepared {
            duration: 1.2,
            number_of_channels: -1,
        }
    );
    assert!(f.service.play(key(1)));
    let time = f.service.current_time(key(1));
    assert_eq!(time.position, 0.0);
    assert!(time.is_playing);
}

#[tokio::test]
async fn test_missing_resource_reports_error_payload() {
    let f = fixture().await;

    let payload = f
        .service
        .create(key(2), "/definitely/not/here.wav", CreateOptions::default())
        .await;

    match payload {
        CreatePayload::Failed { code, message } => {
            assert_eq!(code, -1);
            assert!(message.contains("not/here.wav"));
        }
        other => panic!("unexpected payload: {other:?}"),
    }
    assert!(!f.service.play(key(2)));
    assert_eq!(f.service.current_time(key(2)).position, -1.0);
}

#[tokio::test]
async fn test_route_changes_are_forwarded_until_shutdown() {
    let f = fixture().await;
    let mut events = f.service.subscribe();
    assert!(f.service.is_route_subscribed());

    f.route.set_headset_plugged(true);
    let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("route change not forwarded")
        .unwrap();
    assert_eq!(
        event,
        SoundEvent::RouteChange {
            is_headset_plugged: true
        }
    );
    assert!(f.service.is_headset_plugged().await.unwrap());

    f.service.shutdown().await;
    assert!(!f.service.is_route_subscribed());

    f.route.set_headset_plugged(false);
    let late = tokio::time::timeout(Duration::from_millis(50), events.recv()).await;
    assert!(late.is_err(), "no events after shutdown");
}

#[tokio::test]
async fn test_shutdown_releases_sessions_and_is_idempotent() {
    let f = fixture().await;
    for raw in 1..=2 {
        f.service
            .create(key(raw), "loop.ogg", CreateOptions::default())
            .await;
    }

    f.service.shutdown().await;
    f.service.shutdown().await;

    assert!(f.service.manager().is_empty());
    let mut released = f.engine.released.lock().unwrap().clone();
    released.sort_unstable();
    assert_eq!(released, vec![1, 2]);
}

#[tokio::test]
async fn test_system_volume_is_clamped() -> anyhow::Result<()> {
    let f = fixture().await;
    assert_eq!(f.service.system_volume().await?, 0.5);

    f.service.set_system_volume(1.8).await?;
    assert_eq!(f.service.system_volume().await?, 1.0);

    f.service.set_system_volume(-0.3).await?;
    assert_eq!(f.service.system_volume().await?, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_speakerphone_requires_live_session() -> anyhow::Result<()> {
    let f = fixture().await;

    assert!(!f.service.set_speakerphone_on(key(5), true).await?);
    assert!(!f.mixer.is_speakerphone_on());

    f.service
        .create(key(5), "voice.wav", CreateOptions::default())
        .await;
    assert!(f.service.set_speakerphone_on(key(5), true).await?);
    assert!(f.mixer.is_speakerphone_on());
    Ok(())
}

#[tokio::test]
async fn test_mixer_failure_maps_to_error_payload() {
    let mut mixer = MockMixer::new();
    mixer
        .expect_stream_volume()
        .returning(|| Err(BridgeError::NotAvailable("mixer offline".into())));
    mixer
        .expect_set_stream_volume()
        .with(eq(1.0))
        .times(1)
        .returning(|_| Ok(()));

    let config = SoundConfig::builder()
        .engine(Arc::new(InstantEngine::default()))
        .system_audio(Arc::new(mixer))
        .build()
        .unwrap();
    let service = SoundService::bootstrap(config).await.unwrap();

    let err = service.system_volume().await.unwrap_err();
    let payload = ErrorPayload::from(&err);
    assert_eq!(payload.code, -1);
    assert!(payload.message.contains("mixer offline"));

    service.set_system_volume(4.0).await.unwrap();
}

#[tokio::test]
async fn test_default_category_applies_from_config() {
    let engine = Arc::new(InstantEngine::default());
    let config = SoundConfig::builder()
        .engine(engine)
        .default_category("Playback")
        .mix_with_others(false)
        .resource_root(sounds_dir())
        .build()
        .unwrap();
    let service = SoundService::bootstrap(config).await.unwrap();

    service
        .create(key(1), "song.mp3", CreateOptions::default())
        .await;
    assert!(service.play(key(1)));
    assert_eq!(service.manager().focus_owner(), Some(key(1)));
}

#[tokio::test]
async fn test_pan_and_loop_count_reach_session() {
    let f = fixture().await;
    let options: CreateOptions = serde_json::from_value(serde_json::json!({
        "audioStreamType": "VOICE_CALL",
        "loadSync": true,
    }))
    .unwrap();
    assert_eq!(options.audio_stream_type.as_deref(), Some("VOICE_CALL"));

    assert!(f.service.create(key(1), "voice.wav", options).await.is_prepared());
    f.service.set_pan(key(1), -0.25);
    f.service.set_number_of_loops(key(1), 3);

    let info = f.service.session_info(key(1)).unwrap();
    assert_eq!(info.pan, -0.25);
    assert_eq!(info.number_of_loops, 3);
    assert!(info.looping);
    assert_eq!(info.stream_target, Some(StreamTarget::VoiceCall));

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["numberOfLoops"], 3);
    assert_eq!(json["streamTarget"], "VoiceCall");
}
