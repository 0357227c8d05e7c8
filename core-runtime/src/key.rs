//! Session keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen identifier of a playback session.
///
/// Hosts allocate keys themselves (usually a per-process counter), so any
/// `i64` is valid, negative values included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(i64);

impl SessionKey {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl From<i64> for SessionKey {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
