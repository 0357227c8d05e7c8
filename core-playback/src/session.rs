//! # Playback Sessions
//!
//! One record per caller-chosen key, owned by the session registry.
//!
//! ## State machine
//!
//! ```text
//!            create                ready
//!   (none) ─────────> Preparing ─────────> Ready <──────────────┐
//!                         │                  │ play     completed│
//!                   error │                  v                  │
//!                         └──> Error <──── Playing ─────────────┘
//!                              error      │  ^  ^
//!                                  pause  │  │  │ play
//!                                         v  │  │
//!                                     Paused │  Stopped
//!                                         └──┴──> (stop from Playing/Paused)
//!
//!   reset: any ──> Idle            release: any ──> Released (removed)
//! ```

use crate::category::{Category, CategoryPolicy};
use crate::preparation::PreparationRequest;
use bridge_traits::{EngineHandle, StreamTarget};
use core_runtime::SessionKey;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Reset by the host; unusable until created again.
    Idle,
    Preparing,
    Ready,
    Playing,
    Paused,
    Stopped,
    Error,
    Released,
}

impl SessionState {
    /// The engine holds a prepared player, so control calls reach it.
    pub fn is_prepared(&self) -> bool {
        matches!(
            self,
            SessionState::Ready | SessionState::Playing | SessionState::Paused | SessionState::Stopped
        )
    }

    /// `play` may start playback from this state.
    pub fn can_play(&self) -> bool {
        matches!(
            self,
            SessionState::Ready | SessionState::Paused | SessionState::Stopped
        )
    }
}

/// Repeat count meaning "until stopped".
pub const LOOP_FOREVER: i32 = -1;

/// Per-channel gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub left: f32,
    pub right: f32,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            left: 1.0,
            right: 1.0,
        }
    }
}

pub(crate) struct Session {
    pub key: SessionKey,
    pub handle: EngineHandle,
    pub state: SessionState,
    pub policy: CategoryPolicy,
    /// Stream the player was routed to at create, if any.
    pub target: Option<StreamTarget>,
    pub volume: Volume,
    pub pan: f32,
    /// The engine applied `pan` itself; otherwise it is folded into the
    /// channel gains.
    pub native_pan: bool,
    /// Repeats after the first play-through, [`LOOP_FOREVER`] or `>= 0`.
    pub loops: i32,
    pub speed: f32,
    pub pitch: f32,
    pub duration: Option<Duration>,
    pub channels: Option<u16>,
    pub position: Duration,
    pub request: Arc<PreparationRequest>,
    /// Id of the most recent `play` call; older attempts are stale.
    pub attempt: u64,
}

impl Session {
    pub fn new(
        key: SessionKey,
        handle: EngineHandle,
        policy: CategoryPolicy,
        request: Arc<PreparationRequest>,
    ) -> Self {
        Self {
            key,
            handle,
            state: SessionState::Preparing,
            policy,
            target: None,
            volume: Volume::default(),
            pan: 0.0,
            native_pan: false,
            loops: 0,
            speed: 1.0,
            pitch: 1.0,
            duration: None,
            channels: None,
            position: Duration::ZERO,
            request,
            attempt: 0,
        }
    }

    /// Whether a prepare signal carrying `request_id` still applies here.
    pub fn awaits(&self, request_id: uuid::Uuid) -> bool {
        self.state == SessionState::Preparing && self.request.id() == request_id
    }

    pub fn loops_forever(&self) -> bool {
        self.loops == LOOP_FOREVER
    }

    /// Gains handed to the engine: the requested volume with any emulated
    /// pan applied. Panning left attenuates the right channel and vice versa.
    pub fn output_gain(&self) -> (f32, f32) {
        let Volume { left, right } = self.volume;
        if self.native_pan || self.pan == 0.0 {
            return (left, right);
        }
        let attenuated = 1.0 - self.pan.abs();
        if self.pan < 0.0 {
            (left, right * attenuated)
        } else {
            (left * attenuated, right)
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            key: self.key,
            state: self.state,
            category: self.policy.category,
            mix_with_others: self.policy.mix_with_others,
            stream_target: self.target,
            volume: self.volume,
            pan: self.pan,
            looping: self.loops != 0,
            number_of_loops: self.loops,
            speed: self.speed,
            pitch: self.pitch,
            duration: self.duration,
            channels: self.channels,
            position: self.position,
        }
    }
}

/// Point-in-time snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub key: SessionKey,
    pub state: SessionState,
    pub category: Option<Category>,
    pub mix_with_others: bool,
    pub stream_target: Option<StreamTarget>,
    pub volume: Volume,
    pub pan: f32,
    pub looping: bool,
    pub number_of_loops: i32,
    pub speed: f32,
    pub pitch: f32,
    pub duration: Option<Duration>,
    pub channels: Option<u16>,
    /// Last position the core observed. Live positions come from
    /// `current_time`.
    pub position: Duration,
}
