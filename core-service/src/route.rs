//! Forwards headset route changes from the host monitor onto the event bus.

use crate::error::Result;
use bridge_traits::RouteMonitor;
use core_runtime::events::{EventBus, SoundEvent};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

/// Background task owning one route subscription.
///
/// Dropping the forwarder cancels the task; [`stop`](Self::stop) also waits
/// for it to finish.
pub(crate) struct RouteForwarder {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RouteForwarder {
    /// Subscribes with `monitor` and spawns the forwarding task.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(monitor: &dyn RouteMonitor, events: EventBus) -> Result<Self> {
        let mut changes = monitor.subscribe_changes().await?;
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        trace!("Route forwarding cancelled");
                        break;
                    }
                    change = changes.next() => match change {
                        Some(is_headset_plugged) => {
                            debug!(is_headset_plugged, "Route changed");
                            events
                                .emit(SoundEvent::RouteChange { is_headset_plugged })
                                .ok();
                        }
                        None => {
                            debug!("Route monitor closed its stream");
                            break;
                        }
                    },
                }
            }
        });

        info!("Route change subscription started");
        Ok(Self { cancel, task })
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Unsubscribes and waits for the task to exit.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
        info!("Route change subscription stopped");
    }
}

impl Drop for RouteForwarder {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
