//! # Sound Manager
//!
//! Host-facing operation surface over the session registry.
//!
//! ## Overview
//!
//! - `create` resolves the locator, opens a player, registers the session as
//!   `Preparing` and waits for the first prepare signal.
//! - Control operations (`play`, `pause`, `stop`, setters, ...) are
//!   synchronous and never fail: unknown keys and sessions in the wrong
//!   state are ignored, queries return sentinels.
//! - Engine and focus callbacks arrive on arbitrary threads through the
//!   adapters in `listener`, each guarded by a completion token.
//!
//! ## Locking
//!
//! Session mutations happen under the registry mutex. The focus arbiter has
//! its own lock, only ever taken after the registry lock. Events are emitted
//! and focus is requested or abandoned with no lock held, because providers
//! and subscribers may call straight back into the manager.

use crate::category::{parse_stream_type, CategoryPolicy};
use crate::error::{Result, SoundError, PAYLOAD_ERROR_CODE};
use crate::focus::{FocusAction, FocusArbiter};
use crate::listener::{
    FocusSignal, PlaybackAttempt, PlaybackSignal, PrepareSignal, PreparationListener,
};
use crate::preparation::{PrepareOutcome, PreparationRequest, PreparedSound};
use crate::registry::SessionRegistry;
use crate::session::{Session, SessionInfo, SessionState, Volume, LOOP_FOREVER};
use bridge_traits::{
    AudioEngine, BridgeError, FocusChange, FocusListener, FocusProvider, PrepareListener,
    SourceResolver, StreamTarget,
};
use core_runtime::events::{EventBus, EventStream, SoundEvent};
use core_runtime::logging::display_locator;
use core_runtime::{SessionKey, SoundConfig};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, trace, warn};

/// Options accepted by [`SoundManager::create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOptions {
    /// Overrides the process-wide category for this session only.
    pub category: Option<String>,
    /// Overrides the process-wide mixing flag for this session only.
    pub mix_with_others: Option<bool>,
    /// Prepare on the calling thread when the source allows it.
    pub load_sync: bool,
    /// Initial playback rate.
    pub speed: Option<f32>,
    /// Stream name such as `ALARM` or `VOICE_CALL`. Only used when no
    /// category applies to the session.
    pub audio_stream_type: Option<String>,
}

impl CreateOptions {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_mix_with_others(mut self, mix: bool) -> Self {
        self.mix_with_others = Some(mix);
        self
    }

    pub fn with_load_sync(mut self, load_sync: bool) -> Self {
        self.load_sync = load_sync;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_audio_stream_type(mut self, stream_type: impl Into<String>) -> Self {
        self.audio_stream_type = Some(stream_type.into());
        self
    }
}

/// Cheap to clone; clones share the same sessions.
#[derive(Clone)]
pub struct SoundManager {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    engine: Arc<dyn AudioEngine>,
    resolver: Arc<dyn SourceResolver>,
    registry: Mutex<SessionRegistry>,
    focus: FocusArbiter,
    focus_listener: Arc<dyn FocusListener>,
    policy: RwLock<CategoryPolicy>,
    events: EventBus,
    attempts: AtomicU64,
}

enum PlayOutcome {
    Missing,
    AlreadyPlaying,
    Rejected(SessionState),
    Started(Option<StreamTarget>),
    Failed { code: i32, message: String },
}

fn engine_failure(err: BridgeError) -> (i32, String) {
    match err {
        BridgeError::Engine { code, message } => (code, message),
        other => (PAYLOAD_ERROR_CODE, other.to_string()),
    }
}

impl SoundManager {
    pub fn new(
        engine: Arc<dyn AudioEngine>,
        resolver: Arc<dyn SourceResolver>,
        focus_provider: Arc<dyn FocusProvider>,
        events: EventBus,
    ) -> Self {
        let inner = Arc::new_cyclic(|core| Inner {
            engine,
            resolver,
            registry: Mutex::new(SessionRegistry::new()),
            focus: FocusArbiter::new(focus_provider),
            focus_listener: Arc::new(FocusSignal::new(core.clone())),
            policy: RwLock::new(CategoryPolicy::default()),
            events,
            attempts: AtomicU64::new(0),
        });
        Self { inner }
    }

    /// Builds a manager from a validated configuration, applying its
    /// default category policy.
    pub fn from_config(config: &SoundConfig) -> Self {
        let manager = Self::new(
            Arc::clone(&config.engine),
            Arc::clone(&config.resolver),
            Arc::clone(&config.focus_provider),
            EventBus::new(config.event_buffer_size),
        );
        *manager.inner.policy.write() = CategoryPolicy::from_name(
            config.default_category.as_deref(),
            config.mix_with_others,
        );
        manager
    }

    /// Creates (or replaces) the session for `key` and waits until it is
    /// prepared.
    ///
    /// An existing session under `key` is released first, and its pending
    /// `create`, if any, resolves with [`SoundError::Superseded`].
    ///
    /// # Errors
    ///
    /// - [`SoundError::ResourceNotFound`] if the locator does not resolve
    /// - [`SoundError::EngineError`] if the engine fails to prepare
    /// - [`SoundError::Superseded`] if the session is released or replaced
    ///   before preparation finishes
    #[instrument(skip(self, options), fields(key = %key, locator = display_locator(locator)))]
    pub async fn create(
        &self,
        key: SessionKey,
        locator: &str,
        options: CreateOptions,
    ) -> Result<PreparedSound> {
        let inner = &self.inner;

        let source = inner.resolver.resolve(locator).await.map_err(|err| {
            debug!(error = %err, "Locator did not resolve");
            SoundError::ResourceNotFound(locator.to_string())
        })?;

        let handle = inner
            .engine
            .open(&source)
            .map_err(SoundError::from_engine)?;

        let policy = inner
            .policy
            .read()
            .with_overrides(options.category.as_deref(), options.mix_with_others);
        let target = policy.stream_target().or_else(|| {
            options
                .audio_stream_type
                .as_deref()
                .map(parse_stream_type)
        });
        let routed = match target {
            Some(target) => match inner.engine.set_stream_target(handle, target) {
                Ok(()) => Some(target),
                Err(err) => {
                    warn!(error = %err, ?target, "Failed to route session, using engine default");
                    None
                }
            },
            None => None,
        };

        let (request, rx) = PreparationRequest::new(key);
        let mut session = Session::new(key, handle, policy, Arc::clone(&request));
        session.target = routed;
        if let Some(speed) = options.speed {
            match inner.engine.set_speed(handle, speed) {
                Ok(()) => session.speed = speed,
                Err(err) => warn!(error = %err, speed, "Engine rejected initial speed"),
            }
        }

        let previous = inner.registry.lock().remove(key);
        if let Some(previous) = previous {
            info!(previous = %previous.handle, "Superseding existing session");
            inner.dispose(previous);
        }
        let raced = inner.registry.lock().insert(session);
        if let Some(raced) = raced {
            inner.dispose(raced);
        }

        debug!(
            request_id = %request.id(),
            %handle,
            source = source.kind(),
            "Session preparing"
        );

        let listener: Arc<dyn PrepareListener> = Arc::new(PreparationListener::new(
            Arc::clone(&request),
            Arc::downgrade(inner),
        ));
        let issued = if options.load_sync && source.supports_sync_load() {
            inner.engine.prepare_sync(handle, Arc::clone(&listener))
        } else {
            inner.engine.prepare_async(handle, Arc::clone(&listener))
        };
        if let Err(err) = issued {
            let (code, message) = engine_failure(err);
            listener.on_error(code, message);
        }

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(SoundError::Superseded(key)),
        }
    }

    /// Starts or resumes playback.
    ///
    /// Returns `false` for unknown keys (after emitting
    /// `PlayChange { is_playing: false }`) and for sessions that are not
    /// Ready, Paused or Stopped. Already playing sessions return `true`.
    pub fn play(&self, key: SessionKey) -> bool {
        self.inner.play(key, true)
    }

    pub fn pause(&self, key: SessionKey) {
        self.inner.pause(key);
    }

    /// Pauses and rewinds to zero. Abandons focus if `key` owns it.
    pub fn stop(&self, key: SessionKey) {
        self.inner.stop(key);
    }

    /// Returns the player to an unprepared state. The session stays
    /// registered as `Idle` and ignores control calls until recreated.
    pub fn reset(&self, key: SessionKey) {
        self.inner.reset(key);
    }

    /// Releases the session. Idempotent.
    pub fn release(&self, key: SessionKey) {
        self.inner.release(key);
    }

    /// Sets per-channel gain, clamped to `0.0..=1.0`.
    pub fn set_volume(&self, key: SessionKey, left: f32, right: f32) {
        let volume = Volume {
            left: left.clamp(0.0, 1.0),
            right: right.clamp(0.0, 1.0),
        };
        self.inner
            .update_prepared(key, "set_volume", |engine, session| {
                session.volume = volume;
                let (left, right) = session.output_gain();
                engine.set_volume(session.handle, left, right)
            });
    }

    /// Sets stereo balance, clamped to `-1.0..=1.0`.
    ///
    /// Falls back to attenuating one channel when the engine has no native
    /// pan. The cached volume keeps the unattenuated gains.
    pub fn set_pan(&self, key: SessionKey, pan: f32) {
        if pan.is_nan() {
            warn!(%key, "Ignoring NaN pan");
            return;
        }
        let pan = pan.clamp(-1.0, 1.0);
        self.inner.update_prepared(key, "set_pan", |engine, session| {
            session.pan = pan;
            match engine.set_pan(session.handle, pan) {
                Ok(()) => {
                    session.native_pan = true;
                    Ok(())
                }
                Err(BridgeError::NotAvailable(_)) => {
                    trace!(key = %session.key, pan, "Emulating pan with channel gains");
                    session.native_pan = false;
                    let (left, right) = session.output_gain();
                    engine.set_volume(session.handle, left, right)
                }
                Err(err) => Err(err),
            }
        });
    }

    /// `true` repeats forever, `false` plays once.
    pub fn set_looping(&self, key: SessionKey, looping: bool) {
        let loops = if looping { LOOP_FOREVER } else { 0 };
        self.inner
            .update_prepared(key, "set_looping", |engine, session| {
                session.loops = loops;
                engine.set_looping(session.handle, looping)
            });
    }

    /// Repeats after the first play-through. Any negative count repeats
    /// until stopped.
    pub fn set_number_of_loops(&self, key: SessionKey, loops: i32) {
        let loops = loops.max(LOOP_FOREVER);
        self.inner
            .update_prepared(key, "set_number_of_loops", |engine, session| {
                session.loops = loops;
                engine.set_loop_count(session.handle, loops)
            });
    }

    pub fn set_speed(&self, key: SessionKey, speed: f32) {
        if speed.is_nan() || speed <= 0.0 {
            warn!(%key, speed, "Ignoring non-positive speed");
            return;
        }
        self.inner.update_prepared(key, "set_speed", |engine, session| {
            session.speed = speed;
            engine.set_speed(session.handle, speed)
        });
    }

    pub fn set_pitch(&self, key: SessionKey, pitch: f32) {
        if pitch.is_nan() || pitch <= 0.0 {
            warn!(%key, pitch, "Ignoring non-positive pitch");
            return;
        }
        self.inner.update_prepared(key, "set_pitch", |engine, session| {
            session.pitch = pitch;
            engine.set_pitch(session.handle, pitch)
        });
    }

    /// Seeks to `seconds`. Negative values seek to zero.
    pub fn set_current_time(&self, key: SessionKey, seconds: f64) {
        let position = Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::ZERO);
        self.inner
            .update_prepared(key, "set_current_time", |engine, session| {
                session.position = position;
                engine.seek(session.handle, position)
            });
    }

    /// `(position_seconds, is_playing)`, or `(-1.0, false)` for unknown keys.
    pub fn current_time(&self, key: SessionKey) -> (f64, bool) {
        self.inner.current_time(key)
    }

    pub fn is_playing(&self, key: SessionKey) -> bool {
        self.inner
            .registry
            .lock()
            .get(key)
            .map_or(false, |session| session.state == SessionState::Playing)
    }

    /// Sets the policy applied to sessions created from now on.
    pub fn set_category(&self, category: &str, mix_with_others: bool) {
        let policy = CategoryPolicy::from_name(Some(category), mix_with_others);
        info!(
            category,
            resolved = ?policy.category,
            mix_with_others,
            "Category policy updated"
        );
        *self.inner.policy.write() = policy;
    }

    pub fn category_policy(&self) -> CategoryPolicy {
        *self.inner.policy.read()
    }

    pub fn session_info(&self, key: SessionKey) -> Option<SessionInfo> {
        self.inner.registry.lock().get(key).map(Session::info)
    }

    pub fn contains(&self, key: SessionKey) -> bool {
        self.inner.registry.lock().contains(key)
    }

    pub fn keys(&self) -> Vec<SessionKey> {
        self.inner.registry.lock().keys()
    }

    pub fn len(&self) -> usize {
        self.inner.registry.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key currently holding exclusive focus.
    pub fn focus_owner(&self) -> Option<SessionKey> {
        self.inner.focus.owner()
    }

    /// Releases every live session and abandons focus.
    pub fn release_all(&self) {
        self.inner.release_all();
    }

    pub fn subscribe(&self) -> EventStream {
        EventStream::new(self.inner.events.subscribe())
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.events
    }
}

impl fmt::Debug for SoundManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundManager")
            .field("sessions", &self.len())
            .field("focus_owner", &self.focus_owner())
            .field("policy", &self.category_policy())
            .finish()
    }
}

impl Inner {
    fn emit(&self, event: SoundEvent) {
        trace!(event = event.name(), key = ?event.key(), "Emitting event");
        self.events.emit(event).ok();
    }

    /// Tears down a session that has already left the registry.
    /// Emits `PlayChange { is_playing: false }` if it was still playing.
    fn dispose(&self, mut session: Session) {
        let was_playing = session.state == SessionState::Playing;
        session.state = SessionState::Released;
        if session.request.supersede() {
            debug!(key = %session.key, "Pending preparation superseded");
        }
        if let Err(err) = self.engine.release(session.handle) {
            warn!(key = %session.key, handle = %session.handle, error = %err, "Engine release failed");
        }
        self.focus.relinquish(session.key);
        if was_playing {
            self.emit(SoundEvent::PlayChange {
                key: session.key,
                is_playing: false,
            });
        }
    }

    pub(crate) fn finish_preparation(&self, request: &PreparationRequest, signal: PrepareSignal) {
        let key = request.key();
        let mut failed = None;

        let applied: Option<PrepareOutcome> = {
            let mut registry = self.registry.lock();
            let applied = match registry.get_mut(key) {
                Some(session) if session.awaits(request.id()) => {
                    let outcome = match signal {
                        PrepareSignal::Ready => self
                            .engine
                            .duration(session.handle)
                            .map(|duration| {
                                PreparedSound::new(duration, self.engine.channel_count(session.handle))
                            })
                            .map_err(SoundError::from_engine),
                        PrepareSignal::Failed { code, message } => {
                            Err(SoundError::EngineError { code, message })
                        }
                    };
                    match &outcome {
                        Ok(prepared) => {
                            session.state = SessionState::Ready;
                            session.duration = Some(prepared.duration);
                            session.channels = prepared.channels;
                        }
                        Err(_) => session.state = SessionState::Error,
                    }
                    Some(outcome)
                }
                _ => None,
            };
            if matches!(applied, Some(Err(_))) {
                failed = registry.remove(key);
            }
            applied
        };

        let Some(outcome) = applied else {
            debug!(%key, request_id = %request.id(), "Prepare signal for a departed session discarded");
            request.deliver(Err(SoundError::Superseded(key)));
            return;
        };

        if let Some(failed) = failed {
            if let Err(err) = self.engine.release(failed.handle) {
                warn!(%key, error = %err, "Engine release after failed preparation failed");
            }
        }

        match &outcome {
            Ok(prepared) => info!(
                %key,
                request_id = %request.id(),
                duration_ms = prepared.duration.as_millis() as u64,
                channels = ?prepared.channels,
                "Session ready"
            ),
            Err(err) => warn!(%key, request_id = %request.id(), error = %err, "Preparation failed"),
        }
        request.deliver(outcome);
    }

    pub(crate) fn finish_attempt(&self, attempt: &PlaybackAttempt, signal: PlaybackSignal) {
        let key = attempt.key;

        let event = {
            let mut registry = self.registry.lock();
            let Some(session) = registry.get_mut(key) else {
                trace!(%key, attempt = attempt.id, "Playback signal for a departed session dropped");
                return;
            };
            if session.attempt != attempt.id || session.state != SessionState::Playing {
                trace!(%key, attempt = attempt.id, "Stale playback signal dropped");
                return;
            }
            if matches!(signal, PlaybackSignal::Completed) && session.loops_forever() {
                trace!(%key, "Completion ignored while looping");
                return;
            }
            if !attempt.token.try_claim() {
                return;
            }

            match signal {
                PlaybackSignal::Completed => {
                    session.state = SessionState::Ready;
                    SoundEvent::Complete { key }
                }
                PlaybackSignal::Failed { code, message } => {
                    session.state = SessionState::Error;
                    SoundEvent::Error { key, code, message }
                }
            }
        };

        match &event {
            SoundEvent::Error { code, message, .. } => {
                warn!(%key, code, message = message.as_str(), "Playback failed")
            }
            _ => info!(%key, "Playback completed"),
        }
        self.emit(event);
        self.emit(SoundEvent::PlayChange {
            key,
            is_playing: false,
        });
    }

    pub(crate) fn play(self: &Arc<Self>, key: SessionKey, acquire_focus: bool) -> bool {
        let attempt_id = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;

        let outcome = {
            let mut registry = self.registry.lock();
            match registry.get_mut(key) {
                None => PlayOutcome::Missing,
                Some(session) if session.state == SessionState::Playing => {
                    PlayOutcome::AlreadyPlaying
                }
                Some(session) if !session.state.can_play() => PlayOutcome::Rejected(session.state),
                Some(session) => {
                    let attempt = Arc::new(PlaybackAttempt::new(
                        key,
                        attempt_id,
                        Arc::downgrade(self),
                    ));
                    match self.engine.play(session.handle, attempt) {
                        Ok(()) => {
                            session.state = SessionState::Playing;
                            session.attempt = attempt_id;
                            if session.policy.is_exclusive() {
                                self.focus.claim(key);
                                PlayOutcome::Started(Some(
                                    session.target.unwrap_or(StreamTarget::Music),
                                ))
                            } else {
                                PlayOutcome::Started(None)
                            }
                        }
                        Err(err) => {
                            session.state = SessionState::Error;
                            let (code, message) = engine_failure(err);
                            PlayOutcome::Failed { code, message }
                        }
                    }
                }
            }
        };

        match outcome {
            PlayOutcome::Missing => {
                debug!(%key, "play on unknown session");
                self.emit(SoundEvent::PlayChange {
                    key,
                    is_playing: false,
                });
                false
            }
            PlayOutcome::AlreadyPlaying => true,
            PlayOutcome::Rejected(state) => {
                debug!(%key, ?state, "play rejected in current state");
                false
            }
            PlayOutcome::Failed { code, message } => {
                warn!(%key, code, message = message.as_str(), "Engine refused to play");
                self.emit(SoundEvent::Error { key, code, message });
                self.emit(SoundEvent::PlayChange {
                    key,
                    is_playing: false,
                });
                false
            }
            PlayOutcome::Started(exclusive) => {
                if let (true, Some(stream)) = (acquire_focus, exclusive) {
                    if let Err(err) = self
                        .focus
                        .request_grant(stream, Arc::clone(&self.focus_listener))
                    {
                        warn!(%key, error = %err, "Exclusive focus not obtained");
                    }
                }
                info!(%key, attempt = attempt_id, "Playback started");
                self.emit(SoundEvent::PlayChange {
                    key,
                    is_playing: true,
                });
                true
            }
        }
    }

    fn pause(&self, key: SessionKey) -> bool {
        let paused = {
            let mut registry = self.registry.lock();
            match registry.get_mut(key) {
                Some(session) if session.state == SessionState::Playing => {
                    if let Err(err) = self.engine.pause(session.handle) {
                        warn!(%key, error = %err, "Engine pause failed");
                    }
                    if let Ok(position) = self.engine.position(session.handle) {
                        session.position = position;
                    }
                    session.state = SessionState::Paused;
                    true
                }
                _ => false,
            }
        };

        if paused {
            debug!(%key, "Playback paused");
            self.emit(SoundEvent::PlayChange {
                key,
                is_playing: false,
            });
        }
        paused
    }

    fn stop(&self, key: SessionKey) {
        let was_playing = {
            let mut registry = self.registry.lock();
            match registry.get_mut(key) {
                Some(session)
                    if matches!(session.state, SessionState::Playing | SessionState::Paused) =>
                {
                    let was_playing = session.state == SessionState::Playing;
                    if was_playing {
                        if let Err(err) = self.engine.pause(session.handle) {
                            warn!(%key, error = %err, "Engine pause failed");
                        }
                    }
                    if let Err(err) = self.engine.seek(session.handle, Duration::ZERO) {
                        warn!(%key, error = %err, "Engine rewind failed");
                    }
                    session.position = Duration::ZERO;
                    session.state = SessionState::Stopped;
                    was_playing
                }
                _ => false,
            }
        };

        self.focus.relinquish(key);
        if was_playing {
            debug!(%key, "Playback stopped");
            self.emit(SoundEvent::PlayChange {
                key,
                is_playing: false,
            });
        }
    }

    fn reset(&self, key: SessionKey) {
        let outcome = {
            let mut registry = self.registry.lock();
            match registry.get_mut(key) {
                Some(session) if session.state != SessionState::Idle => {
                    let was_playing = session.state == SessionState::Playing;
                    if session.state == SessionState::Preparing {
                        session.request.supersede();
                    }
                    if let Err(err) = self.engine.reset(session.handle) {
                        warn!(%key, error = %err, "Engine reset failed");
                    }
                    session.state = SessionState::Idle;
                    session.duration = None;
                    session.channels = None;
                    session.position = Duration::ZERO;
                    Some(was_playing)
                }
                _ => None,
            }
        };

        let Some(was_playing) = outcome else {
            return;
        };
        debug!(%key, "Session reset");
        self.focus.relinquish(key);
        if was_playing {
            self.emit(SoundEvent::PlayChange {
                key,
                is_playing: false,
            });
        }
    }

    fn release(&self, key: SessionKey) {
        let removed = self.registry.lock().remove(key);
        match removed {
            Some(session) => {
                info!(%key, state = ?session.state, "Session released");
                self.dispose(session);
            }
            None => trace!(%key, "release on unknown session"),
        }
    }

    fn release_all(&self) {
        let sessions = self.registry.lock().drain();
        let count = sessions.len();
        for session in sessions {
            self.dispose(session);
        }
        self.focus.relinquish_all();
        info!(count, "Released all sessions");
    }

    /// Applies `apply` to a prepared session. Returns whether it ran.
    fn update_prepared<F>(&self, key: SessionKey, op: &'static str, apply: F) -> bool
    where
        F: FnOnce(&dyn AudioEngine, &mut Session) -> bridge_traits::error::Result<()>,
    {
        let mut registry = self.registry.lock();
        let Some(session) = registry.get_mut(key) else {
            trace!(%key, op, "Ignored for unknown session");
            return false;
        };
        if !session.state.is_prepared() {
            trace!(%key, op, state = ?session.state, "Ignored before session is ready");
            return false;
        }
        if let Err(err) = apply(self.engine.as_ref(), session) {
            warn!(%key, op, error = %err, "Engine rejected update");
        }
        true
    }

    fn current_time(&self, key: SessionKey) -> (f64, bool) {
        let registry = self.registry.lock();
        match registry.get(key) {
            None => (-1.0, false),
            Some(session) if session.state.is_prepared() => {
                let position = self
                    .engine
                    .position(session.handle)
                    .unwrap_or(session.position);
                (
                    position.as_secs_f64(),
                    self.engine.is_playing(session.handle),
                )
            }
            Some(session) => (session.position.as_secs_f64(), false),
        }
    }

    pub(crate) fn handle_focus_change(self: &Arc<Self>, change: FocusChange) {
        let Some(owner) = self.focus.owner() else {
            trace!(?change, "Focus change with no owner ignored");
            return;
        };
        let owner_playing = self
            .registry
            .lock()
            .get(owner)
            .map_or(false, |session| session.state == SessionState::Playing);

        match self.focus.on_interruption(owner, change, owner_playing) {
            FocusAction::Pause(key) => {
                info!(%key, ?change, "Pausing focus owner");
                self.pause(key);
            }
            FocusAction::Resume(key) => {
                info!(%key, "Resuming focus owner");
                self.play(key, false);
            }
            FocusAction::None => {}
        }
    }
}
