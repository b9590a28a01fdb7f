//! Asset copying from `library-config/assets` into the public directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Destination relative to the public directory.
pub const ASSET_OUTPUT: &str = "images";

/// Files copied in one run, as `/images/...` URLs.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    assets: Vec<String>,
}

impl AssetManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, url: impl Into<String>) {
        self.assets.push(url.into());
    }

    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Copies branding assets, skipping documentation and placeholders.
#[derive(Debug, Default)]
pub struct AssetProcessor;

impl AssetProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether a file under the assets directory is copied.
    #[must_use]
    pub fn is_copied(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        !(name.starts_with('.') || name == "README.md" || name.ends_with(".placeholder"))
    }

    /// Copy everything from `source_dir` into `dest_dir`, preserving
    /// relative paths.
    pub fn process(&self, source_dir: &Path, dest_dir: &Path) -> Result<AssetManifest> {
        let mut manifest = AssetManifest::new();

        if !source_dir.exists() {
            debug!(dir = %source_dir.display(), "no assets directory, skipping");
            return Ok(manifest);
        }

        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "copying assets"
        );

        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !Self::is_copied(path) {
                continue;
            }

            let relative = path
                .strip_prefix(source_dir)
                .map_err(|_| AssetError::InvalidPath(path.to_path_buf()))?;
            let dest_path = dest_dir.join(relative);

            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest_path)?;

            let url = format!("/{ASSET_OUTPUT}/{}", relative.display()).replace('\\', "/");
            debug!(src = %path.display(), dest = %dest_path.display(), "copied asset");
            manifest.add(url);
        }

        info!(count = manifest.len(), "assets copied");
        Ok(manifest)
    }
}
