//! # Preparation Requests
//!
//! A `create` call owns one [`PreparationRequest`]. The request carries the
//! completion token shared by every prepare signal for that call and the
//! channel back to the awaiting caller.
//!
//! Resolution happens in two steps so the registry can be updated between
//! them: [`try_claim`](PreparationRequest::try_claim) decides the winner,
//! [`deliver`](PreparationRequest::deliver) hands the outcome to the caller
//! once locks are dropped.

use crate::error::SoundError;
use crate::token::CompletionToken;
use core_runtime::SessionKey;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use uuid::Uuid;

/// What a successful `create` reports about the prepared media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreparedSound {
    pub duration: Duration,
    /// `None` when the engine cannot tell.
    pub channels: Option<u16>,
}

impl PreparedSound {
    pub fn new(duration: Duration, channels: Option<u16>) -> Self {
        Self { duration, channels }
    }
}

pub type PrepareOutcome = std::result::Result<PreparedSound, SoundError>;

#[derive(Debug)]
pub struct PreparationRequest {
    id: Uuid,
    key: SessionKey,
    token: CompletionToken,
    sender: Mutex<Option<oneshot::Sender<PrepareOutcome>>>,
}

impl PreparationRequest {
    pub fn new(key: SessionKey) -> (Arc<Self>, oneshot::Receiver<PrepareOutcome>) {
        let (tx, rx) = oneshot::channel();
        let request = Arc::new(Self {
            id: Uuid::new_v4(),
            key,
            token: CompletionToken::new(),
            sender: Mutex::new(Some(tx)),
        });
        (request, rx)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> SessionKey {
        self.key
    }

    pub fn is_resolved(&self) -> bool {
        self.token.is_claimed()
    }

    /// Wins the right to resolve this request. `true` at most once.
    pub fn try_claim(&self) -> bool {
        self.token.try_claim()
    }

    /// Sends the outcome to the caller, if it is still waiting.
    ///
    /// Only the claimant calls this; a dropped receiver is not an error.
    pub fn deliver(&self, outcome: PrepareOutcome) {
        if let Some(tx) = self.sender.lock().take() {
            let _ = tx.send(outcome);
        }
    }

    /// Resolves the request as superseded unless a signal already won.
    pub fn supersede(&self) -> bool {
        if self.try_claim() {
            self.deliver(Err(SoundError::Superseded(self.key)));
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deliver_reaches_caller() {
        let (request, rx) = PreparationRequest::new(SessionKey::new(1));
        assert!(request.try_claim());
        request.deliver(Ok(PreparedSound::new(Duration::from_millis(1500), Some(2))));

        let prepared = rx.await.unwrap().unwrap();
        assert_eq!(prepared.duration, Duration::from_millis(1500));
        assert_eq!(prepared.channels, Some(2));
        assert!(request.is_resolved());
    }

    #[tokio::test]
    async fn test_supersede_after_claim_is_noop() {
        let (request, rx) = PreparationRequest::new(SessionKey::new(2));
        assert!(request.try_claim());
        assert!(!request.supersede());

        request.deliver(Ok(PreparedSound::new(Duration::ZERO, None)));
        assert!(rx.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_supersede_resolves_pending_caller() {
        let (request, rx) = PreparationRequest::new(SessionKey::new(3));
        assert!(request.supersede());

        let outcome = rx.await.unwrap();
        assert!(matches!(outcome, Err(SoundError::Superseded(k)) if k == SessionKey::new(3)));
    }

    #[test]
    fn test_deliver_without_receiver_is_silent() {
        let (request, rx) = PreparationRequest::new(SessionKey::new(4));
        drop(rx);
        assert!(request.try_claim());
        request.deliver(Ok(PreparedSound::new(Duration::ZERO, None)));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let (a, _ra) = PreparationRequest::new(SessionKey::new(5));
        let (b, _rb) = PreparationRequest::new(SessionKey::new(5));
        assert_ne!(a.id(), b.id());
    }
}
