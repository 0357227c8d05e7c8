//! System audio controls for desktop hosts.

use async_trait::async_trait;
use bridge_traits::{error::Result, system::SystemAudioControl};
use parking_lot::Mutex;
use tracing::debug;

/// In-process stand-in for the OS mixer.
///
/// There is no portable master-volume API across macOS, Windows and the
/// various Linux sound servers, so the desktop shim keeps the value itself.
/// Desktop machines have no speakerphone route; the flag is recorded only.
pub struct DesktopSystemAudio {
    state: Mutex<MixerState>,
}

#[derive(Debug, Clone, Copy)]
struct MixerState {
    volume: f32,
    speakerphone: bool,
}

impl DesktopSystemAudio {
    pub fn new() -> Self {
        Self::with_volume(1.0)
    }

    pub fn with_volume(volume: f32) -> Self {
        Self {
            state: Mutex::new(MixerState {
                volume: volume.clamp(0.0, 1.0),
                speakerphone: false,
            }),
        }
    }

    pub fn is_speakerphone_on(&self) -> bool {
        self.state.lock().speakerphone
    }
}

impl Default for DesktopSystemAudio {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemAudioControl for DesktopSystemAudio {
    async fn stream_volume(&self) -> Result<f32> {
        Ok(self.state.lock().volume)
    }

    async fn set_stream_volume(&self, value: f32) -> Result<()> {
        self.state.lock().volume = value.clamp(0.0, 1.0);
        debug!(volume = value, "System volume set");
        Ok(())
    }

    async fn set_speakerphone(&self, on: bool) -> Result<()> {
        self.state.lock().speakerphone = on;
        Ok(())
    }
}
