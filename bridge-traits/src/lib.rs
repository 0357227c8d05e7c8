//! # Host Bridge Traits
//!
//! Capabilities the sound core requires from each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the session core and the
//! platform-specific code that actually renders audio. Each trait represents
//! something the core needs but cannot do portably.
//!
//! ## Traits
//!
//! ### Playback
//! - [`AudioEngine`](engine::AudioEngine) - Open, prepare and drive native players
//! - [`SourceResolver`](source::SourceResolver) - Turn locator strings into audio sources
//!
//! ### Platform Integration
//! - [`FocusProvider`](focus::FocusProvider) - Exclusive audio focus and interruptions
//! - [`RouteMonitor`](route::RouteMonitor) - Headset plug state and route changes
//! - [`SystemAudioControl`](system::SystemAudioControl) - System volume and speakerphone
//!
//! ### Utilities
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Resolver, focus, route, system shims |
//! | Android  | Host app            | 📋 Engine injected by host |
//! | iOS      | Host app            | 📋 Engine injected by host |
//! | Windows  | Host app            | 📋 Engine injected by host |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Engines report
//! native failures as [`BridgeError::Engine`] with the platform's error code so
//! the core can surface `{code, message}` payloads unchanged.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync`. Engine and focus callbacks arrive
//! on threads the core does not control.

pub mod engine;
pub mod error;
pub mod focus;
pub mod log;
pub mod route;
pub mod source;
pub mod system;

pub use error::BridgeError;

// Re-export commonly used types
pub use engine::{AudioEngine, EngineHandle, PlaybackListener, PrepareListener, StreamTarget};
pub use focus::{FocusChange, FocusGrant, FocusListener, FocusProvider};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use route::{RouteChangeStream, RouteMonitor};
pub use source::{AudioSource, SourceResolver};
pub use system::SystemAudioControl;
