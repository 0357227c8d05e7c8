//! One-shot completion token.

use std::sync::atomic::{AtomicBool, Ordering};

/// Test-and-set flag guarding a terminal transition.
///
/// Engines may report "ready", "error" or "completed" more than once and
/// from several threads. Whoever claims the token first applies the result;
/// every later signal is dropped.
#[derive(Debug, Default)]
pub struct CompletionToken(AtomicBool);

impl CompletionToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for exactly one caller over the token's lifetime.
    pub fn try_claim(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_claimed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
