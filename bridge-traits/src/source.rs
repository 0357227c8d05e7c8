//! Audio source resolution.
//!
//! Hosts hand the core an opaque *locator* string. Before anything can be
//! opened by the audio engine, a [`SourceResolver`] turns that locator into an
//! [`AudioSource`] the engine understands.

use crate::error::Result;
use bytes::Bytes;
use std::path::PathBuf;

/// Concrete audio source produced by a [`SourceResolver`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    /// Resource bundled with the application package (e.g. Android `res/raw`,
    /// iOS main bundle).
    BundledResource { name: String, path: PathBuf },
    /// File on the local filesystem.
    LocalFile { path: PathBuf },
    /// HTTP(S) stream fetched by the engine.
    RemoteStream { url: String },
    /// Packaged asset addressed with an `asset:/` locator.
    Asset { path: PathBuf },
    /// Encoded audio already held in memory.
    MemoryBuffer { data: Bytes },
}

impl AudioSource {
    /// Determine whether the source represents remote content.
    pub fn is_remote(&self) -> bool {
        matches!(self, AudioSource::RemoteStream { .. })
    }

    /// Whether a synchronous prepare is cheap enough for this class of source.
    ///
    /// Remote streams need network I/O before they are ready, so a
    /// synchronous prepare would block the calling context.
    pub fn supports_sync_load(&self) -> bool {
        !self.is_remote()
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AudioSource::BundledResource { .. } => "bundled",
            AudioSource::LocalFile { .. } => "file",
            AudioSource::RemoteStream { .. } => "remote",
            AudioSource::Asset { .. } => "asset",
            AudioSource::MemoryBuffer { .. } => "memory",
        }
    }
}

/// Resolves host locators into engine-readable sources.
///
/// Resolution failures of any kind (missing file, malformed URL, unreadable
/// asset) should be reported as [`BridgeError::NotFound`](crate::BridgeError::NotFound);
/// the core surfaces them to the caller as a "resource not found" result.
#[async_trait::async_trait]
pub trait SourceResolver: Send + Sync {
    async fn resolve(&self, locator: &str) -> Result<AudioSource>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_sources_do_not_load_synchronously() {
        let remote = AudioSource::RemoteStream {
            url: "https://example.com/a.mp3".to_string(),
        };
        let local = AudioSource::LocalFile {
            path: PathBuf::from("/tmp/a.mp3"),
        };

        assert!(remote.is_remote());
        assert!(!remote.supports_sync_load());
        assert!(local.supports_sync_load());
        assert_eq!(local.kind(), "file");
    }
}
