//! Focus provider for desktops, which have no system-wide focus arbitration.

use bridge_traits::{
    engine::StreamTarget,
    error::Result,
    focus::{FocusChange, FocusGrant, FocusListener, FocusProvider},
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Always grants focus and remembers the holder's listener.
///
/// Hosts that do observe interruptions (an incoming VoIP call, a media key
/// owned by another app) forward them with [`interrupt`](Self::interrupt).
#[derive(Default)]
pub struct DesktopFocusProvider {
    holder: Mutex<Option<Arc<dyn FocusListener>>>,
}

impl DesktopFocusProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some session currently holds focus.
    pub fn is_held(&self) -> bool {
        self.holder.lock().is_some()
    }

    /// Deliver an interruption to the current holder. Returns `false` when
    /// nobody holds focus.
    pub fn interrupt(&self, change: FocusChange) -> bool {
        let listener = self.holder.lock().clone();
        match listener {
            Some(listener) => {
                listener.on_focus_change(change);
                true
            }
            None => false,
        }
    }
}

impl FocusProvider for DesktopFocusProvider {
    fn request_focus(
        &self,
        stream: StreamTarget,
        listener: Arc<dyn FocusListener>,
    ) -> Result<FocusGrant> {
        debug!(?stream, "Focus granted");
        *self.holder.lock() = Some(listener);
        Ok(FocusGrant::Granted)
    }

    fn abandon_focus(&self) -> Result<()> {
        debug!("Focus abandoned");
        self.holder.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingListener {
        losses: AtomicUsize,
    }

    impl FocusListener for CountingListener {
        fn on_focus_change(&self, change: FocusChange) {
            if change.is_loss() {
                self.losses.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_interrupt_reaches_holder_until_abandoned() {
        let provider = DesktopFocusProvider::new();
        let listener = Arc::new(CountingListener::default());

        assert!(!provider.interrupt(FocusChange::TransientLoss));

        let grant = provider
            .request_focus(StreamTarget::Music, listener.clone())
            .unwrap();
        assert_eq!(grant, FocusGrant::Granted);
        assert!(provider.is_held());
        assert!(provider.interrupt(FocusChange::TransientLoss));
        assert_eq!(listener.losses.load(Ordering::SeqCst), 1);

        provider.abandon_focus().unwrap();
        assert!(!provider.interrupt(FocusChange::PermanentLoss));
        assert_eq!(listener.losses.load(Ordering::SeqCst), 1);
    }
}
