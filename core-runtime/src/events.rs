//! # Event Bus System
//!
//! Outbound notifications from the sound core, delivered over
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! - **Event Types**: [`SoundEvent`], one variant per host-visible notification
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Receiver wrapper with optional filtering
//!
//! ```text
//! ┌──────────────────┐   emit    ┌───────────┐  subscribe  ┌──────────────┐
//! │ Session core     ├──────────>│           ├────────────>│ Host emitter │
//! └──────────────────┘           │ EventBus  │             └──────────────┘
//! ┌──────────────────┐   emit    │           │  subscribe  ┌──────────────┐
//! │ Route forwarder  ├──────────>│           ├────────────>│ Tests / UI   │
//! └──────────────────┘           └───────────┘             └──────────────┘
//! ```
//!
//! Engine callbacks publish from arbitrary threads; `emit` never blocks.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, SoundEvent};
//! use core_runtime::SessionKey;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(100);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(SoundEvent::Complete { key: SessionKey::new(1) }).ok();
//! assert_eq!(rx.recv().await.unwrap().key(), Some(SessionKey::new(1)));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber missed `n` events; keep reading.
//! - **`RecvError::Closed`**: every sender is gone; the core has shut down.
//!
//! `emit` fails only when nobody is subscribed. Publishers inside the core
//! ignore that case.

use crate::key::SessionKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Sound Events
// ============================================================================

/// Notification pushed to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum SoundEvent {
    /// A session started or stopped being audible.
    #[serde(rename_all = "camelCase")]
    PlayChange { key: SessionKey, is_playing: bool },
    /// Headset plugged or unplugged.
    #[serde(rename_all = "camelCase")]
    RouteChange { is_headset_plugged: bool },
    /// A non-looping session reached the end of its stream.
    Complete { key: SessionKey },
    /// A session failed while playing.
    Error {
        key: SessionKey,
        code: i32,
        message: String,
    },
}

impl SoundEvent {
    /// Event name used by host event emitters.
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::PlayChange { .. } => "onPlayChange",
            SoundEvent::RouteChange { .. } => "onRouteChange",
            SoundEvent::Complete { .. } => "onComplete",
            SoundEvent::Error { .. } => "onError",
        }
    }

    /// Session the event refers to, if any.
    pub fn key(&self) -> Option<SessionKey> {
        match self {
            SoundEvent::PlayChange { key, .. }
            | SoundEvent::Complete { key }
            | SoundEvent::Error { key, .. } => Some(*key),
            SoundEvent::RouteChange { .. } => None,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            SoundEvent::PlayChange {
                is_playing: true, ..
            } => "Playback started",
            SoundEvent::PlayChange {
                is_playing: false, ..
            } => "Playback stopped",
            SoundEvent::RouteChange { .. } => "Audio route changed",
            SoundEvent::Complete { .. } => "Playback completed",
            SoundEvent::Error { .. } => "Playback error",
        }
    }

    pub fn severity(&self) -> EventSeverity {
        match self {
            SoundEvent::Error { .. } => EventSeverity::Error,
            SoundEvent::RouteChange { .. } | SoundEvent::Complete { .. } => EventSeverity::Info,
            SoundEvent::PlayChange { .. } => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to sound events.
///
/// Cloning the bus yields another sender for the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SoundEvent>,
}

impl EventBus {
    /// Creates a new event bus. Subscribers falling more than `capacity`
    /// events behind receive `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers, returning how many received it.
    pub fn emit(&self, event: SoundEvent) -> Result<usize, SendError<SoundEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<SoundEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&SoundEvent) -> bool + Send + Sync>;

/// A `broadcast::Receiver` with an optional predicate.
///
/// ```rust
/// use core_runtime::events::{EventBus, EventStream};
/// use core_runtime::SessionKey;
///
/// let bus = EventBus::new(16);
/// let stream = EventStream::for_key(bus.subscribe(), SessionKey::new(7));
/// ```
pub struct EventStream {
    receiver: Receiver<SoundEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<SoundEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Stream that only yields events about `key`.
    pub fn for_key(receiver: Receiver<SoundEvent>, key: SessionKey) -> Self {
        Self::new(receiver).filter(move |event| event.key() == Some(key))
    }

    /// Only events matching `predicate` will be returned by `recv()`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&SoundEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &SoundEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// `RecvError::Lagged(n)` if the subscriber fell behind by `n` events,
    /// `RecvError::Closed` once all senders have been dropped.
    pub async fn recv(&mut self) -> Result<SoundEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv). Returns `None` when no
    /// matching event is queued.
    pub fn try_recv(&mut self) -> Option<Result<SoundEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
