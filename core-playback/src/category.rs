//! # Route/Category Policy
//!
//! Audio-intent categories and the hardware stream each one routes to.
//!
//! The process-wide [`CategoryPolicy`] is written by `set_category` and read
//! once when a session is created; existing sessions keep whatever target
//! they were created with.

use bridge_traits::StreamTarget;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Audio intent declared by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Playback,
    Ambient,
    System,
    Voice,
    Ring,
    Alarm,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Playback,
        Category::Ambient,
        Category::System,
        Category::Voice,
        Category::Ring,
        Category::Alarm,
    ];

    /// Parses a host-supplied category name (case-insensitive).
    ///
    /// Unknown names are logged and yield `None`, which leaves the engine's
    /// default stream in place.
    pub fn parse(name: &str) -> Option<Category> {
        let found = Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(name.trim()));

        if found.is_none() {
            warn!(category = name, "Unrecognised category, keeping engine default");
        }
        found
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Playback => "Playback",
            Category::Ambient => "Ambient",
            Category::System => "System",
            Category::Voice => "Voice",
            Category::Ring => "Ring",
            Category::Alarm => "Alarm",
        }
    }

    pub fn stream_target(&self) -> StreamTarget {
        match self {
            Category::Playback => StreamTarget::Music,
            Category::Ambient => StreamTarget::Notification,
            Category::System => StreamTarget::System,
            Category::Voice => StreamTarget::VoiceCall,
            Category::Ring => StreamTarget::Ring,
            Category::Alarm => StreamTarget::Alarm,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a per-session stream type name (`ALARM`, `DTMF`, `MUSIC`,
/// `NOTIFICATION`, `RING`, `SYSTEM`, `VOICE_CALL`) to its stream.
///
/// Unknown names fall back to [`StreamTarget::Music`].
pub fn parse_stream_type(name: &str) -> StreamTarget {
    const NAMES: [(&str, StreamTarget); 7] = [
        ("ALARM", StreamTarget::Alarm),
        ("DTMF", StreamTarget::Dtmf),
        ("MUSIC", StreamTarget::Music),
        ("NOTIFICATION", StreamTarget::Notification),
        ("RING", StreamTarget::Ring),
        ("SYSTEM", StreamTarget::System),
        ("VOICE_CALL", StreamTarget::VoiceCall),
    ];

    NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name.trim()))
        .map(|(_, target)| *target)
        .unwrap_or_else(|| {
            warn!(stream_type = name, "Unrecognised stream type, using MUSIC");
            StreamTarget::Music
        })
}

/// Category and mixing behaviour applied to new sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPolicy {
    pub category: Option<Category>,
    /// `false` makes sessions take exclusive audio focus when they play.
    pub mix_with_others: bool,
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self {
            category: None,
            mix_with_others: true,
        }
    }
}

impl CategoryPolicy {
    pub fn new(category: Option<Category>, mix_with_others: bool) -> Self {
        Self {
            category,
            mix_with_others,
        }
    }

    /// Builds a policy from a host-supplied category name.
    pub fn from_name(name: Option<&str>, mix_with_others: bool) -> Self {
        Self::new(name.and_then(Category::parse), mix_with_others)
    }

    /// Per-session overrides from create options. Absent fields inherit.
    pub fn with_overrides(&self, category: Option<&str>, mix_with_others: Option<bool>) -> Self {
        Self {
            category: match category {
                Some(name) => Category::parse(name),
                None => self.category,
            },
            mix_with_others: mix_with_others.unwrap_or(self.mix_with_others),
        }
    }

    pub fn stream_target(&self) -> Option<StreamTarget> {
        self.category.map(|category| category.stream_target())
    }

    pub fn is_exclusive(&self) -> bool {
        !self.mix_with_others
    }
}
