//! # Sound Error Types
//!
//! Errors surfaced by the session core. Control operations never return
//! these; they degrade to `false` or sentinel values. Only `create` and the
//! focus request path produce a [`SoundError`].

use bridge_traits::BridgeError;
use core_runtime::SessionKey;
use thiserror::Error;

/// Code reported to hosts for every failure payload.
pub const PAYLOAD_ERROR_CODE: i32 = -1;

#[derive(Error, Debug)]
pub enum SoundError {
    /// The resolver could not turn the locator into a readable source.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The engine rejected the source or failed while preparing/playing it.
    #[error("Engine error {code}: {message}")]
    EngineError { code: i32, message: String },

    /// No live session is registered under this key.
    #[error("Invalid session key: {0}")]
    InvalidKey(SessionKey),

    /// The focus provider refused an exclusive grant.
    #[error("Audio focus denied")]
    FocusDenied,

    /// The session was released or replaced before its preparation resolved.
    #[error("Session {0} was released or replaced before preparation finished")]
    Superseded(SessionKey),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

impl SoundError {
    /// Code carried in host payloads. Native codes stay in the message.
    pub fn code(&self) -> i32 {
        PAYLOAD_ERROR_CODE
    }

    /// Classifies an engine-side failure.
    pub fn from_engine(err: BridgeError) -> Self {
        match err {
            BridgeError::Engine { code, message } => SoundError::EngineError { code, message },
            BridgeError::NotFound(locator) => SoundError::ResourceNotFound(locator),
            other => SoundError::Bridge(other),
        }
    }

    /// Returns `true` if the pending request lost its session rather than
    /// failing on its own.
    pub fn is_superseded(&self) -> bool {
        matches!(self, SoundError::Superseded(_))
    }
}

/// Result type for sound operations.
pub type Result<T> = std::result::Result<T, SoundError>;
