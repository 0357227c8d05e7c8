use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Service initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Sound error: {0}")]
    Sound(#[from] core_playback::SoundError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::BridgeError),
}

impl ServiceError {
    /// Code reported in host payloads. Every failure maps to `-1`.
    pub fn code(&self) -> i32 {
        core_playback::error::PAYLOAD_ERROR_CODE
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
