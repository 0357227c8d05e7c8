//! Audio focus bridge.
//!
//! Mobile platforms arbitrate audible output between applications. The core
//! asks for focus when an exclusive session starts playing and reacts to the
//! interruption notifications the platform pushes back.

use crate::engine::StreamTarget;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Interruption notification pushed by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusChange {
    /// Focus lost for a short time (incoming notification, navigation prompt).
    TransientLoss,
    /// Focus lost until the user starts playback again.
    PermanentLoss,
    /// Focus returned after a transient loss.
    Regained,
}

impl FocusChange {
    pub fn is_loss(&self) -> bool {
        matches!(self, FocusChange::TransientLoss | FocusChange::PermanentLoss)
    }
}

/// Outcome of a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusGrant {
    Granted,
    Denied,
}

pub trait FocusListener: Send + Sync {
    fn on_focus_change(&self, change: FocusChange);
}

/// Platform focus manager (Android `AudioManager`, iOS `AVAudioSession`).
///
/// Implementations must not invoke the listener synchronously from
/// `request_focus`; changes are delivered later, from any thread.
pub trait FocusProvider: Send + Sync {
    /// Request exclusive focus for `stream`. `listener` receives subsequent
    /// interruption notifications until focus is abandoned.
    fn request_focus(
        &self,
        stream: StreamTarget,
        listener: Arc<dyn FocusListener>,
    ) -> Result<FocusGrant>;

    fn abandon_focus(&self) -> Result<()>;
}
