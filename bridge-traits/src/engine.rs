//! Audio engine bridge.
//!
//! The engine owns the native players (MediaPlayer, AVAudioPlayer,
//! MediaPlaybackItem, ...). The core addresses them through opaque
//! [`EngineHandle`]s and receives asynchronous outcomes through listener
//! objects that the engine may invoke from any thread.
//!
//! ## Callback contract
//!
//! - Listeners may be invoked more than once, or after the handle was
//!   released. The core guards against both; engines need not.
//! - Control calls (`play`, `pause`, `seek`, ...) must not invoke a listener
//!   synchronously on the calling thread. Only [`AudioEngine::prepare_sync`]
//!   is allowed to do so.

use crate::error::{BridgeError, Result};
use crate::source::AudioSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Opaque identifier of a native player owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandle(u64);

impl EngineHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hardware stream a player is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamTarget {
    Music,
    Notification,
    System,
    VoiceCall,
    Ring,
    Alarm,
    /// Dial tones.
    Dtmf,
}

/// Receives the terminal outcome of a prepare call.
pub trait PrepareListener: Send + Sync {
    fn on_ready(&self);

    fn on_error(&self, code: i32, message: String);
}

/// Receives end-of-stream and runtime failures for one `play` call.
pub trait PlaybackListener: Send + Sync {
    fn on_completion(&self);

    fn on_error(&self, code: i32, message: String);
}

/// Platform audio engine.
pub trait AudioEngine: Send + Sync {
    /// Allocate a native player for `source`. The player is not prepared yet.
    fn open(&self, source: &AudioSource) -> Result<EngineHandle>;

    /// Route the player to a hardware stream. Must be called before prepare.
    fn set_stream_target(&self, handle: EngineHandle, target: StreamTarget) -> Result<()>;

    /// Start preparing in the background. Exactly one of the listener's
    /// methods is expected to fire later, but the core tolerates duplicates.
    fn prepare_async(&self, handle: EngineHandle, listener: Arc<dyn PrepareListener>)
        -> Result<()>;

    /// Prepare on the calling thread, firing the listener before returning.
    ///
    /// Engines without a cheap synchronous path may keep the default, which
    /// falls back to [`prepare_async`](AudioEngine::prepare_async).
    fn prepare_sync(&self, handle: EngineHandle, listener: Arc<dyn PrepareListener>) -> Result<()> {
        self.prepare_async(handle, listener)
    }

    /// Start or resume playback. `listener` replaces any listener registered
    /// by an earlier `play` on the same handle.
    fn play(&self, handle: EngineHandle, listener: Arc<dyn PlaybackListener>) -> Result<()>;

    fn pause(&self, handle: EngineHandle) -> Result<()>;

    fn seek(&self, handle: EngineHandle, position: Duration) -> Result<()>;

    /// Per-channel gain in `0.0..=1.0`.
    fn set_volume(&self, handle: EngineHandle, left: f32, right: f32) -> Result<()>;

    fn set_looping(&self, handle: EngineHandle, looping: bool) -> Result<()>;

    /// Stereo balance in `-1.0..=1.0`.
    ///
    /// Engines without a native balance control keep the default, and the
    /// core emulates it by attenuating one channel through
    /// [`set_volume`](AudioEngine::set_volume).
    fn set_pan(&self, _handle: EngineHandle, _pan: f32) -> Result<()> {
        Err(BridgeError::NotAvailable("native pan".to_string()))
    }

    /// Repeat count after the first play-through; `-1` repeats forever.
    ///
    /// The default can only loop forever or not at all.
    fn set_loop_count(&self, handle: EngineHandle, loops: i32) -> Result<()> {
        self.set_looping(handle, loops != 0)
    }

    fn set_speed(&self, handle: EngineHandle, speed: f32) -> Result<()>;

    fn set_pitch(&self, handle: EngineHandle, pitch: f32) -> Result<()>;

    /// Return the player to its uninitialized state without freeing it.
    fn reset(&self, handle: EngineHandle) -> Result<()>;

    /// Free the native player. The handle is invalid afterwards.
    fn release(&self, handle: EngineHandle) -> Result<()>;

    fn duration(&self, handle: EngineHandle) -> Result<Duration>;

    /// Channel count of a prepared player, when the platform reports it.
    fn channel_count(&self, _handle: EngineHandle) -> Option<u16> {
        None
    }

    fn position(&self, handle: EngineHandle) -> Result<Duration>;

    fn is_playing(&self, handle: EngineHandle) -> bool;
}
