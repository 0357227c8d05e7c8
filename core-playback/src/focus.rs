//! # Focus Arbiter
//!
//! Tracks which session owns exclusive audio focus and decides what an
//! interruption does to it.
//!
//! Only sessions created with `mix_with_others == false` take part. Playing
//! such a session records it as owner and asks the provider for a grant; a
//! later `play` on another exclusive session simply transfers ownership and
//! leaves the previous owner playing.
//!
//! The arbiter never touches the registry itself. It returns a
//! [`FocusAction`] and the manager applies it with the registry lock free,
//! so the arbiter lock is never held while the registry lock is taken.

use crate::error::{Result, SoundError};
use bridge_traits::{FocusChange, FocusGrant, FocusListener, FocusProvider, StreamTarget};
use core_runtime::SessionKey;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct FocusState {
    owner: Option<SessionKey>,
    /// Owner was playing when a loss arrived and should resume on regain.
    was_playing: bool,
}

/// What the manager must do in response to a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    None,
    Pause(SessionKey),
    Resume(SessionKey),
}

pub struct FocusArbiter {
    provider: Arc<dyn FocusProvider>,
    state: Mutex<FocusState>,
}

impl FocusArbiter {
    pub fn new(provider: Arc<dyn FocusProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(FocusState::default()),
        }
    }

    pub fn owner(&self) -> Option<SessionKey> {
        self.state.lock().owner
    }

    /// Records `key` as owner and returns the previous owner.
    pub fn claim(&self, key: SessionKey) -> Option<SessionKey> {
        let mut state = self.state.lock();
        let previous = state.owner.replace(key);
        if previous != Some(key) {
            state.was_playing = false;
        }
        previous
    }

    /// Asks the provider for an exclusive grant.
    ///
    /// Must be called with no core locks held: providers may deliver focus
    /// changes synchronously. A denial is reported but playback proceeds.
    pub fn request_grant(
        &self,
        stream: StreamTarget,
        listener: Arc<dyn FocusListener>,
    ) -> Result<()> {
        match self.provider.request_focus(stream, listener)? {
            FocusGrant::Granted => {
                debug!(?stream, "Exclusive focus granted");
                Ok(())
            }
            FocusGrant::Denied => {
                warn!(?stream, "Exclusive focus denied, playing anyway");
                Err(SoundError::FocusDenied)
            }
        }
    }

    /// Abandons focus if `key` owns it. Returns whether it did.
    pub fn relinquish(&self, key: SessionKey) -> bool {
        let was_owner = {
            let mut state = self.state.lock();
            if state.owner == Some(key) {
                *state = FocusState::default();
                true
            } else {
                false
            }
        };

        if was_owner {
            self.abandon();
        }
        was_owner
    }

    /// Abandons focus whoever owns it.
    pub fn relinquish_all(&self) {
        let had_owner = {
            let mut state = self.state.lock();
            std::mem::take(&mut *state).owner.is_some()
        };
        if had_owner {
            self.abandon();
        }
    }

    fn abandon(&self) {
        if let Err(err) = self.provider.abandon_focus() {
            warn!(error = %err, "Failed to abandon audio focus");
        }
    }

    /// Decides the reaction to `change` for `owner`.
    ///
    /// `owner_playing` is the owner's state as read by the caller. If
    /// ownership moved in the meantime the change is ignored.
    pub fn on_interruption(
        &self,
        owner: SessionKey,
        change: FocusChange,
        owner_playing: bool,
    ) -> FocusAction {
        let mut state = self.state.lock();
        if state.owner != Some(owner) {
            return FocusAction::None;
        }

        match change {
            FocusChange::TransientLoss => {
                if owner_playing {
                    state.was_playing = true;
                    FocusAction::Pause(owner)
                } else {
                    FocusAction::None
                }
            }
            FocusChange::PermanentLoss => {
                // No automatic resume after a permanent loss.
                state.was_playing = false;
                if owner_playing {
                    FocusAction::Pause(owner)
                } else {
                    FocusAction::None
                }
            }
            FocusChange::Regained => {
                if std::mem::take(&mut state.was_playing) {
                    FocusAction::Resume(owner)
                } else {
                    FocusAction::None
                }
            }
        }
    }
}
