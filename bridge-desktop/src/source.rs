//! Locator resolution against the local filesystem.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    source::{AudioSource, SourceResolver},
};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use url::Url;

const ASSET_SCHEME: &str = "asset:/";

/// Filesystem-backed source resolver
///
/// Locators are tried in this order:
/// 1. bundled resource name under the resource directory
/// 2. `asset:/relative/path` under the asset directory
/// 3. `http://` / `https://` URL (not checked, the engine streams it)
/// 4. `file:` URL, percent-decoded
/// 5. plain filesystem path
pub struct DesktopSourceResolver {
    resource_dir: PathBuf,
    asset_dir: PathBuf,
}

impl DesktopSourceResolver {
    /// Create a resolver rooted at the platform data directory
    pub fn new() -> Self {
        let base = Self::default_root();

        Self {
            resource_dir: base.join("raw"),
            asset_dir: base.join("assets"),
        }
    }

    /// `<data dir>/sound-bridge`, or the temp dir when no data dir exists.
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("sound-bridge")
    }

    /// Create a resolver with custom resource and asset directories
    pub fn with_directories(resource_dir: PathBuf, asset_dir: PathBuf) -> Self {
        Self {
            resource_dir,
            asset_dir,
        }
    }

    /// Bundled resources are addressed by bare name, with or without extension.
    async fn find_resource(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return None;
        }

        let exact = self.resource_dir.join(name);
        if is_file(&exact).await {
            return Some(exact);
        }

        let mut entries = fs::read_dir(&self.resource_dir).await.ok()?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let stem_matches = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(|stem| stem.eq_ignore_ascii_case(name))
                .unwrap_or(false);
            if stem_matches && is_file(&path).await {
                return Some(path);
            }
        }
        None
    }
}

impl Default for DesktopSourceResolver {
    fn default() -> Self {
        Self::new()
    }
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

fn not_found(locator: &str) -> BridgeError {
    BridgeError::NotFound(locator.to_string())
}

/// Asset locators may only name files below the asset directory.
fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[async_trait]
impl SourceResolver for DesktopSourceResolver {
    async fn resolve(&self, locator: &str) -> Result<AudioSource> {
        if let Some(path) = self.find_resource(locator).await {
            debug!(name = locator, "Resolved bundled resource");
            return Ok(AudioSource::BundledResource {
                name: locator.to_string(),
                path,
            });
        }

        if let Some(relative) = locator.strip_prefix(ASSET_SCHEME) {
            let relative = Path::new(relative.trim_start_matches('/'));
            if !is_contained(relative) {
                warn!(locator, "Asset locator escapes the asset directory");
                return Err(not_found(locator));
            }
            let path = self.asset_dir.join(relative);
            return if is_file(&path).await {
                Ok(AudioSource::Asset { path })
            } else {
                Err(not_found(locator))
            };
        }

        if let Ok(url) = Url::parse(locator) {
            match url.scheme() {
                "http" | "https" => {
                    return Ok(AudioSource::RemoteStream {
                        url: url.to_string(),
                    });
                }
                "file" => {
                    let path = url.to_file_path().map_err(|_| not_found(locator))?;
                    return if is_file(&path).await {
                        Ok(AudioSource::LocalFile { path })
                    } else {
                        Err(not_found(locator))
                    };
                }
                // Drive letters such as `C:` parse as schemes; treat them as paths.
                _ => {}
            }
        }

        let path = PathBuf::from(locator);
        if is_file(&path).await {
            return Ok(AudioSource::LocalFile { path });
        }

        Err(not_found(locator))
    }
}
