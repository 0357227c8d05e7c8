//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the sound core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//! - Session keys
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the playback and service
//! crates depend on. It establishes the logging conventions, the capability
//! configuration, and the event broadcasting used throughout the system.

pub mod config;
pub mod error;
pub mod events;
pub mod key;
pub mod logging;

pub use config::{SoundConfig, SoundConfigBuilder};
pub use error::{Error, Result};
pub use events::{EventBus, EventStream, SoundEvent};
pub use key::SessionKey;
