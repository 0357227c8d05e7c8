//! System-wide audio controls that are not tied to a single player.

use crate::error::Result;

#[async_trait::async_trait]
pub trait SystemAudioControl: Send + Sync {
    /// Media stream volume normalized to `0.0..=1.0`.
    async fn stream_volume(&self) -> Result<f32>;

    /// Set the media stream volume. `value` is already clamped to `0.0..=1.0`.
    async fn set_stream_volume(&self, value: f32) -> Result<()>;

    /// Route output to the speakerphone (communication mode) or back to the
    /// normal route.
    async fn set_speakerphone(&self, on: bool) -> Result<()>;
}
