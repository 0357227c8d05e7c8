//! Audio Route Monitoring
//!
//! Reports whether a wired or bluetooth headset is connected and pushes
//! changes as they happen.

use crate::error::Result;

/// Audio route monitor trait
///
/// # Platform Support
///
/// - **iOS**: `AVAudioSessionRouteChangeNotification`
/// - **Android**: `ACTION_HEADSET_PLUG` / `ACTION_AUDIO_BECOMING_NOISY` broadcasts
/// - **Desktop**: no portable API; hosts push changes manually
#[async_trait::async_trait]
pub trait RouteMonitor: Send + Sync {
    /// Pull query for the current route.
    async fn is_headset_plugged(&self) -> Result<bool>;

    /// Subscribe to route changes.
    ///
    /// Dropping the returned stream unsubscribes.
    async fn subscribe_changes(&self) -> Result<Box<dyn RouteChangeStream>>;
}

/// Stream of route changes.
#[async_trait::async_trait]
pub trait RouteChangeStream: Send {
    /// Next headset state. Returns `None` when the stream is closed.
    async fn next(&mut self) -> Option<bool>;
}
