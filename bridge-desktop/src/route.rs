//! Audio Route Monitoring Implementation

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    route::{RouteChangeStream, RouteMonitor},
};
use tokio::sync::watch;
use tracing::debug;

/// Desktop route monitor
///
/// Desktops expose jack detection through vendor-specific APIs only, so the
/// headset state is pushed in by the host via
/// [`set_headset_plugged`](Self::set_headset_plugged).
pub struct DesktopRouteMonitor {
    state: watch::Sender<bool>,
}

impl DesktopRouteMonitor {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state }
    }

    /// Record a new headset state, notifying subscribers if it changed.
    pub fn set_headset_plugged(&self, plugged: bool) {
        let changed = self.state.send_if_modified(|current| {
            if *current == plugged {
                false
            } else {
                *current = plugged;
                true
            }
        });
        if changed {
            debug!(plugged, "Headset route changed");
        }
    }
}

impl Default for DesktopRouteMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouteMonitor for DesktopRouteMonitor {
    async fn is_headset_plugged(&self) -> Result<bool> {
        Ok(*self.state.borrow())
    }

    async fn subscribe_changes(&self) -> Result<Box<dyn RouteChangeStream>> {
        Ok(Box::new(DesktopRouteChangeStream {
            receiver: self.state.subscribe(),
        }))
    }
}

struct DesktopRouteChangeStream {
    receiver: watch::Receiver<bool>,
}

#[async_trait]
impl RouteChangeStream for DesktopRouteChangeStream {
    async fn next(&mut self) -> Option<bool> {
        self.receiver.changed().await.ok()?;
        let plugged = *self.receiver.borrow_and_update();
        Some(plugged)
    }
}
