//! Host-facing payloads.
//!
//! Bridges hand these to their JavaScript/Kotlin/Swift side as plain maps,
//! so field names follow the host convention (`camelCase`).

use crate::error::ServiceError;
use core_playback::error::PAYLOAD_ERROR_CODE;
use core_playback::{PreparedSound, SoundError};
use serde::{Deserialize, Serialize};

/// Channel count reported when the engine cannot tell.
pub const UNKNOWN_CHANNELS: i32 = -1;

/// Result of `create`: `{duration, numberOfChannels}` with the duration in
/// seconds, or `{code, message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatePayload {
    #[serde(rename_all = "camelCase")]
    Prepared {
        duration: f64,
        number_of_channels: i32,
    },
    Failed {
        code: i32,
        message: String,
    },
}

impl CreatePayload {
    pub fn is_prepared(&self) -> bool {
        matches!(self, CreatePayload::Prepared { .. })
    }
}

impl From<Result<PreparedSound, SoundError>> for CreatePayload {
    fn from(outcome: Result<PreparedSound, SoundError>) -> Self {
        match outcome {
            Ok(prepared) => CreatePayload::Prepared {
                duration: prepared.duration.as_secs_f64(),
                number_of_channels: prepared
                    .channels
                    .map_or(UNKNOWN_CHANNELS, i32::from),
            },
            Err(err) => CreatePayload::Failed {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

/// Answer to `getCurrentTime`. Unknown sessions report `position == -1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTime {
    pub position: f64,
    pub is_playing: bool,
}

impl From<(f64, bool)> for CurrentTime {
    fn from((position, is_playing): (f64, bool)) -> Self {
        Self {
            position,
            is_playing,
        }
    }
}

/// `{code: -1, message}` for failed host calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: i32,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: PAYLOAD_ERROR_CODE,
            message: message.into(),
        }
    }
}

impl From<&ServiceError> for ErrorPayload {
    fn from(err: &ServiceError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<ServiceError> for ErrorPayload {
    fn from(err: ServiceError) -> Self {
        Self::from(&err)
    }
}
