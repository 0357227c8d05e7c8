//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (audio engine,
//! resolver, focus, route and system audio) into the sound core and exposes
//! the operation surface host bindings call. Results are converted into the
//! payloads hosts expect (`{duration, numberOfChannels}` or
//! `{code: -1, message}`).
//!
//! Desktop apps typically enable the `desktop-shims` feature (which depends
//! on `bridge-desktop`) so only the audio engine has to be supplied.

pub mod error;
pub mod payload;
mod route;

pub use error::{Result, ServiceError};
pub use payload::{CreatePayload, CurrentTime, ErrorPayload};

pub use core_playback::{
    Category, CategoryPolicy, CreateOptions, PreparedSound, SessionInfo, SessionKey, SessionState,
    SoundError, SoundManager,
};
pub use core_runtime::events::{EventStream, SoundEvent};
pub use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
pub use core_runtime::{SoundConfig, SoundConfigBuilder};

/// Desktop bridge implementations, for hosts that push route or focus
/// changes into the shims themselves.
#[cfg(feature = "desktop-shims")]
pub use bridge_desktop as desktop;

use bridge_traits::{RouteMonitor, SystemAudioControl};
use parking_lot::Mutex;
use route::RouteForwarder;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

struct ServiceInner {
    manager: SoundManager,
    route_monitor: Arc<dyn RouteMonitor>,
    system_audio: Arc<dyn SystemAudioControl>,
    route: Mutex<Option<RouteForwarder>>,
}

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct SoundService {
    inner: Arc<ServiceInner>,
}

impl SoundService {
    /// Builds the service and subscribes to route changes.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(config))]
    pub async fn bootstrap(config: SoundConfig) -> Result<Self> {
        config.validate()?;
        let manager = SoundManager::from_config(&config);

        let forwarder =
            RouteForwarder::start(config.route_monitor.as_ref(), manager.event_bus().clone())
                .await
                .map_err(|err| {
                    ServiceError::InitializationFailed(format!(
                        "route subscription failed: {err}"
                    ))
                })?;

        info!(policy = ?manager.category_policy(), "Sound service ready");
        Ok(Self {
            inner: Arc::new(ServiceInner {
                manager,
                route_monitor: Arc::clone(&config.route_monitor),
                system_audio: Arc::clone(&config.system_audio),
                route: Mutex::new(Some(forwarder)),
            }),
        })
    }

    /// Direct access to the session manager for Rust callers that want
    /// typed results instead of payloads.
    pub fn manager(&self) -> &SoundManager {
        &self.inner.manager
    }

    pub async fn create(
        &self,
        key: SessionKey,
        locator: &str,
        options: CreateOptions,
    ) -> CreatePayload {
        CreatePayload::from(self.inner.manager.create(key, locator, options).await)
    }

    pub fn play(&self, key: SessionKey) -> bool {
        self.inner.manager.play(key)
    }

    pub fn pause(&self, key: SessionKey) {
        self.inner.manager.pause(key);
    }

    pub fn stop(&self, key: SessionKey) {
        self.inner.manager.stop(key);
    }

    pub fn reset(&self, key: SessionKey) {
        self.inner.manager.reset(key);
    }

    pub fn release(&self, key: SessionKey) {
        self.inner.manager.release(key);
    }

    pub fn set_volume(&self, key: SessionKey, left: f32, right: f32) {
        self.inner.manager.set_volume(key, left, right);
    }

    pub fn set_pan(&self, key: SessionKey, pan: f32) {
        self.inner.manager.set_pan(key, pan);
    }

    pub fn set_looping(&self, key: SessionKey, looping: bool) {
        self.inner.manager.set_looping(key, looping);
    }

    /// `-1` repeats until stopped.
    pub fn set_number_of_loops(&self, key: SessionKey, loops: i32) {
        self.inner.manager.set_number_of_loops(key, loops);
    }

    pub fn set_speed(&self, key: SessionKey, speed: f32) {
        self.inner.manager.set_speed(key, speed);
    }

    pub fn set_pitch(&self, key: SessionKey, pitch: f32) {
        self.inner.manager.set_pitch(key, pitch);
    }

    pub fn set_current_time(&self, key: SessionKey, seconds: f64) {
        self.inner.manager.set_current_time(key, seconds);
    }

    pub fn current_time(&self, key: SessionKey) -> CurrentTime {
        CurrentTime::from(self.inner.manager.current_time(key))
    }

    pub fn is_playing(&self, key: SessionKey) -> bool {
        self.inner.manager.is_playing(key)
    }

    pub fn set_category(&self, category: &str, mix_with_others: bool) {
        self.inner.manager.set_category(category, mix_with_others);
    }

    pub fn session_info(&self, key: SessionKey) -> Option<SessionInfo> {
        self.inner.manager.session_info(key)
    }

    pub fn subscribe(&self) -> EventStream {
        self.inner.manager.subscribe()
    }

    /// Media volume in `0.0..=1.0`.
    pub async fn system_volume(&self) -> Result<f32> {
        let volume = self.inner.system_audio.stream_volume().await?;
        Ok(volume.clamp(0.0, 1.0))
    }

    /// Sets the media volume, clamped to `0.0..=1.0`.
    pub async fn set_system_volume(&self, value: f32) -> Result<()> {
        if value.is_nan() {
            warn!("Ignoring NaN system volume");
            return Ok(());
        }
        let value = value.clamp(0.0, 1.0);
        debug!(value, "Setting system volume");
        self.inner.system_audio.set_stream_volume(value).await?;
        Ok(())
    }

    /// Switches speakerphone routing. Only honored while `key` names a live
    /// session; returns whether the switch was applied.
    pub async fn set_speakerphone_on(&self, key: SessionKey, on: bool) -> Result<bool> {
        if !self.inner.manager.contains(key) {
            debug!(%key, on, "Speakerphone request for unknown session ignored");
            return Ok(false);
        }
        self.inner.system_audio.set_speakerphone(on).await?;
        info!(%key, on, "Speakerphone routing changed");
        Ok(true)
    }

    pub async fn is_headset_plugged(&self) -> Result<bool> {
        Ok(self.inner.route_monitor.is_headset_plugged().await?)
    }

    /// Whether route changes are still being forwarded.
    pub fn is_route_subscribed(&self) -> bool {
        self.inner
            .route
            .lock()
            .as_ref()
            .map_or(false, RouteForwarder::is_running)
    }

    /// Releases every session and unsubscribes from route changes.
    /// Idempotent.
    pub async fn shutdown(&self) {
        self.inner.manager.release_all();
        let forwarder = self.inner.route.lock().take();
        if let Some(mut forwarder) = forwarder {
            forwarder.stop().await;
        }
        info!("Sound service shut down");
    }
}

impl fmt::Debug for SoundService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundService")
            .field("manager", &self.inner.manager)
            .field("route_subscribed", &self.is_route_subscribed())
            .finish()
    }
}

/// Convenience bootstrapper for desktop hosts: every capability except the
/// engine comes from `bridge-desktop`.
///
/// ```ignore
/// let service = core_service::bootstrap_desktop(Arc::new(MyEngine::new())).await?;
/// let payload = service.create(SessionKey::new(1), "click.wav", Default::default()).await;
/// ```
#[cfg(feature = "desktop-shims")]
pub async fn bootstrap_desktop(
    engine: Arc<dyn bridge_traits::AudioEngine>,
) -> Result<SoundService> {
    let config = SoundConfig::builder().engine(engine).build()?;
    SoundService::bootstrap(config).await
}
