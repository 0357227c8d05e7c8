//! Engine and focus callback adapters.
//!
//! Each adapter holds a weak reference to the manager state so a callback
//! that outlives the manager is dropped silently.

use crate::manager::Inner;
use crate::preparation::PreparationRequest;
use crate::token::CompletionToken;
use bridge_traits::{FocusChange, FocusListener, PlaybackListener, PrepareListener};
use core_runtime::SessionKey;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Terminal prepare signal.
pub(crate) enum PrepareSignal {
    Ready,
    Failed { code: i32, message: String },
}

/// Terminal playback signal.
pub(crate) enum PlaybackSignal {
    Completed,
    Failed { code: i32, message: String },
}

pub(crate) struct PreparationListener {
    request: Arc<PreparationRequest>,
    core: Weak<Inner>,
}

impl PreparationListener {
    pub fn new(request: Arc<PreparationRequest>, core: Weak<Inner>) -> Self {
        Self { request, core }
    }

    fn signal(&self, signal: PrepareSignal) {
        if !self.request.try_claim() {
            trace!(
                key = %self.request.key(),
                request_id = %self.request.id(),
                "Duplicate prepare signal dropped"
            );
            return;
        }

        match self.core.upgrade() {
            Some(core) => core.finish_preparation(&self.request, signal),
            None => self
                .request
                .deliver(Err(crate::SoundError::Superseded(self.request.key()))),
        }
    }
}

impl PrepareListener for PreparationListener {
    fn on_ready(&self) {
        self.signal(PrepareSignal::Ready);
    }

    fn on_error(&self, code: i32, message: String) {
        self.signal(PrepareSignal::Failed { code, message });
    }
}

/// One `play` call. Its token makes completion and error mutually exclusive
/// and single-shot for that call.
pub(crate) struct PlaybackAttempt {
    pub key: SessionKey,
    pub id: u64,
    pub token: CompletionToken,
    core: Weak<Inner>,
}

impl PlaybackAttempt {
    pub fn new(key: SessionKey, id: u64, core: Weak<Inner>) -> Self {
        Self {
            key,
            id,
            token: CompletionToken::new(),
            core,
        }
    }
}

impl PlaybackListener for PlaybackAttempt {
    fn on_completion(&self) {
        if let Some(core) = self.core.upgrade() {
            core.finish_attempt(self, PlaybackSignal::Completed);
        }
    }

    fn on_error(&self, code: i32, message: String) {
        if let Some(core) = self.core.upgrade() {
            core.finish_attempt(self, PlaybackSignal::Failed { code, message });
        }
    }
}

pub(crate) struct FocusSignal {
    core: Weak<Inner>,
}

impl FocusSignal {
    pub fn new(core: Weak<Inner>) -> Self {
        Self { core }
    }
}

impl FocusListener for FocusSignal {
    fn on_focus_change(&self, change: FocusChange) {
        if let Some(core) = self.core.upgrade() {
            core.handle_focus_change(change);
        }
    }
}
