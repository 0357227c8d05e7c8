use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Audio source not found: {0}")]
    NotFound(String),

    #[error("Audio engine error {code}: {message}")]
    Engine { code: i32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Shorthand for an engine failure carrying the native error code.
    pub fn engine(code: i32, message: impl Into<String>) -> Self {
        BridgeError::Engine {
            code,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
