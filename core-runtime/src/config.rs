//! # Sound Core Configuration
//!
//! Builder-based configuration holding every host capability the sound core
//! needs, plus a handful of tunables.
//!
//! ## Required Dependencies
//!
//! - `AudioEngine` - always injected by the host
//!
//! ## Dependencies with desktop defaults
//!
//! - `SourceResolver` - locator resolution (desktop: filesystem resolver)
//! - `FocusProvider` - exclusive focus (desktop: always-grant provider)
//! - `RouteMonitor` - headset state (desktop: host-driven watch channel)
//! - `SystemAudioControl` - system volume (desktop: software mixer state)
//!
//! Without the `desktop-shims` feature a missing capability fails the build
//! with [`Error::CapabilityMissing`].
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::SoundConfig;
//! use std::sync::Arc;
//!
//! let config = SoundConfig::builder()
//!     .engine(Arc::new(MyEngine::new()))
//!     .resource_root("/opt/app/raw")
//!     .default_category("Playback")
//!     .mix_with_others(false)
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{AudioEngine, FocusProvider, RouteMonitor, SourceResolver, SystemAudioControl};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_EVENT_BUFFER: usize = 100;
const MAX_EVENT_BUFFER: usize = 10_000;

/// Configuration for the sound core.
///
/// Use [`SoundConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct SoundConfig {
    pub engine: Arc<dyn AudioEngine>,
    pub resolver: Arc<dyn SourceResolver>,
    pub focus_provider: Arc<dyn FocusProvider>,
    pub route_monitor: Arc<dyn RouteMonitor>,
    pub system_audio: Arc<dyn SystemAudioControl>,

    /// Capacity of the event broadcast channel
    pub event_buffer_size: usize,

    /// Category name applied at bootstrap (e.g. `"Playback"`)
    pub default_category: Option<String>,

    /// Whether sessions may mix with other audio. Non-mixing sessions take
    /// exclusive focus when they start playing.
    pub mix_with_others: bool,

    /// Directory searched for bundled resources by name
    pub resource_root: Option<PathBuf>,

    /// Directory backing `asset:/` locators
    pub asset_root: Option<PathBuf>,
}

impl std::fmt::Debug for SoundConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundConfig")
            .field("engine", &"AudioEngine { ... }")
            .field("resolver", &"SourceResolver { ... }")
            .field("focus_provider", &"FocusProvider { ... }")
            .field("route_monitor", &"RouteMonitor { ... }")
            .field("system_audio", &"SystemAudioControl { ... }")
            .field("event_buffer_size", &self.event_buffer_size)
            .field("default_category", &self.default_category)
            .field("mix_with_others", &self.mix_with_others)
            .field("resource_root", &self.resource_root)
            .field("asset_root", &self.asset_root)
            .finish()
    }
}

impl SoundConfig {
    pub fn builder() -> SoundConfigBuilder {
        SoundConfigBuilder::default()
    }

    /// Validates tunables.
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer_size > MAX_EVENT_BUFFER {
            return Err(Error::Config(format!(
                "Event buffer size exceeds maximum of {}",
                MAX_EVENT_BUFFER
            )));
        }

        if let Some(category) = &self.default_category {
            if category.trim().is_empty() {
                return Err(Error::Config(
                    "Default category cannot be blank. Omit it to keep the platform default."
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn capability_missing(capability: &str, purpose: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: format!(
            "{} implementation is required for {}. \
             Desktop: enable the 'desktop-shims' feature to use the default. \
             Mobile: inject the platform-native implementation.",
            capability, purpose
        ),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_resolver(
    resource_root: Option<&PathBuf>,
    asset_root: Option<&PathBuf>,
) -> Result<Arc<dyn SourceResolver>> {
    use bridge_desktop::DesktopSourceResolver;

    let resolver = match (resource_root, asset_root) {
        (None, None) => DesktopSourceResolver::new(),
        (resources, assets) => {
            let fallback = DesktopSourceResolver::default_root();
            DesktopSourceResolver::with_directories(
                resources.cloned().unwrap_or_else(|| fallback.join("raw")),
                assets.cloned().unwrap_or_else(|| fallback.join("assets")),
            )
        }
    };
    Ok(Arc::new(resolver))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_resolver(
    _resource_root: Option<&PathBuf>,
    _asset_root: Option<&PathBuf>,
) -> Result<Arc<dyn SourceResolver>> {
    Err(capability_missing("SourceResolver", "locator resolution"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_focus_provider() -> Result<Arc<dyn FocusProvider>> {
    Ok(Arc::new(bridge_desktop::DesktopFocusProvider::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_focus_provider() -> Result<Arc<dyn FocusProvider>> {
    Err(capability_missing("FocusProvider", "exclusive audio focus"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_route_monitor() -> Result<Arc<dyn RouteMonitor>> {
    Ok(Arc::new(bridge_desktop::DesktopRouteMonitor::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_route_monitor() -> Result<Arc<dyn RouteMonitor>> {
    Err(capability_missing("RouteMonitor", "headset route events"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_system_audio() -> Result<Arc<dyn SystemAudioControl>> {
    Ok(Arc::new(bridge_desktop::DesktopSystemAudio::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_system_audio() -> Result<Arc<dyn SystemAudioControl>> {
    Err(capability_missing("SystemAudioControl", "system volume control"))
}

/// Builder for [`SoundConfig`].
#[derive(Default)]
pub struct SoundConfigBuilder {
    engine: Option<Arc<dyn AudioEngine>>,
    resolver: Option<Arc<dyn SourceResolver>>,
    focus_provider: Option<Arc<dyn FocusProvider>>,
    route_monitor: Option<Arc<dyn RouteMonitor>>,
    system_audio: Option<Arc<dyn SystemAudioControl>>,
    event_buffer_size: Option<usize>,
    default_category: Option<String>,
    mix_with_others: Option<bool>,
    resource_root: Option<PathBuf>,
    asset_root: Option<PathBuf>,
}

impl SoundConfigBuilder {
    /// Sets the native audio engine (required).
    pub fn engine(mut self, engine: Arc<dyn AudioEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn SourceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn focus_provider(mut self, provider: Arc<dyn FocusProvider>) -> Self {
        self.focus_provider = Some(provider);
        self
    }

    pub fn route_monitor(mut self, monitor: Arc<dyn RouteMonitor>) -> Self {
        self.route_monitor = Some(monitor);
        self
    }

    pub fn system_audio(mut self, control: Arc<dyn SystemAudioControl>) -> Self {
        self.system_audio = Some(control);
        self
    }

    /// Sets the event channel capacity.
    ///
    /// Default: 100. Slow subscribers that fall further behind than this
    /// see `Lagged` errors.
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    pub fn default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = Some(category.into());
        self
    }

    /// Default: true
    pub fn mix_with_others(mut self, mix: bool) -> Self {
        self.mix_with_others = Some(mix);
        self
    }

    /// Directory of bundled resources for the default desktop resolver.
    ///
    /// Ignored when a custom resolver is injected.
    pub fn resource_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.resource_root = Some(path.into());
        self
    }

    /// Directory backing `asset:/` locators for the default desktop resolver.
    pub fn asset_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.asset_root = Some(path.into());
        self
    }

    /// Builds and validates the configuration.
    ///
    /// Fails when the engine is missing, when another capability is missing
    /// and no desktop default is compiled in, or when a tunable is out of
    /// range.
    pub fn build(self) -> Result<SoundConfig> {
        let engine = self
            .engine
            .ok_or_else(|| capability_missing("AudioEngine", "native playback"))?;

        let resolver = match self.resolver {
            Some(resolver) => resolver,
            None => provide_default_resolver(self.resource_root.as_ref(), self.asset_root.as_ref())?,
        };

        let focus_provider = match self.focus_provider {
            Some(provider) => provider,
            None => provide_default_focus_provider()?,
        };

        let route_monitor = match self.route_monitor {
            Some(monitor) => monitor,
            None => provide_default_route_monitor()?,
        };

        let system_audio = match self.system_audio {
            Some(control) => control,
            None => provide_default_system_audio()?,
        };

        let config = SoundConfig {
            engine,
            resolver,
            focus_provider,
            route_monitor,
            system_audio,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER),
            default_category: self.default_category,
            mix_with_others: self.mix_with_others.unwrap_or(true),
            resource_root: self.resource_root,
            asset_root: self.asset_root,
        };

        config.validate()?;

        Ok(config)
    }
}
