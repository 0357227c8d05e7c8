//! # Sound Session Core
//!
//! Independently addressable playback sessions on top of a host audio engine.
//!
//! ## Overview
//!
//! This crate handles:
//! - A registry of sessions keyed by caller-chosen [`SessionKey`]s
//! - Asynchronous preparation that resolves each `create` exactly once
//! - The per-session playback state machine
//! - Category routing applied when sessions are created
//! - Exclusive audio focus and interruption handling
//! - Play-state notifications through the runtime [`EventBus`](core_runtime::EventBus)
//!
//! Everything is driven through [`SoundManager`].

pub mod category;
pub mod error;
pub mod focus;
mod listener;
pub mod manager;
pub mod preparation;
mod registry;
pub mod session;
pub mod token;

pub use category::{parse_stream_type, Category, CategoryPolicy};
pub use core_runtime::SessionKey;
pub use error::{Result, SoundError};
pub use focus::{FocusAction, FocusArbiter};
pub use manager::{CreateOptions, SoundManager};
pub use preparation::PreparedSound;
pub use session::{SessionInfo, SessionState, Volume};
pub use token::CompletionToken;
