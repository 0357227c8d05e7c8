//! Workspace umbrella crate.
//!
//! Host applications depend on `sound-bridge-workspace` and pick features
//! instead of wiring `core-service`, `core-playback` and the bridge crates
//! individually. With the default `desktop-shims` feature the desktop bridge
//! defaults are enabled as well.

#[cfg(feature = "desktop-shims")]
pub use core_service::*;
