//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `SourceResolver` over the local filesystem (`DesktopSourceResolver`)
//! - `FocusProvider` that always grants focus (`DesktopFocusProvider`)
//! - `RouteMonitor` fed by the host (`DesktopRouteMonitor`)
//! - `SystemAudioControl` with an in-process mixer value (`DesktopSystemAudio`)
//!
//! No desktop `AudioEngine` ships here; hosts inject their renderer.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopFocusProvider, DesktopSourceResolver};
//! use std::sync::Arc;
//!
//! let resolver = Arc::new(DesktopSourceResolver::with_directories(
//!     "/opt/app/raw".into(),
//!     "/opt/app/assets".into(),
//! ));
//! let focus = Arc::new(DesktopFocusProvider::new());
//! // Use in SoundConfig
//! ```

mod focus;
mod route;
mod source;
mod system;

pub use focus::DesktopFocusProvider;
pub use route::DesktopRouteMonitor;
pub use source::DesktopSourceResolver;
pub use system::DesktopSystemAudio;
