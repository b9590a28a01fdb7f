//! Project layout settings.
//!
//! Read from an optional `stacks.toml` and overridable through
//! `STACKS__<KEY>` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default settings file name at the project root.
pub const SETTINGS_FILE: &str = "stacks.toml";

/// Directory layout of a library project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Project root every relative directory resolves against.
    #[serde(skip)]
    pub root: PathBuf,

    /// Where `branding.yaml`, `deployment.yaml` and friends live.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Site sources processed in place.
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Markdown content referenced by the library structure.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Public static directory (PDFs, images).
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("library-config")
}

fn default_src_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config_dir: default_config_dir(),
            src_dir: default_src_dir(),
            content_dir: default_content_dir(),
            public_dir: default_public_dir(),
        }
    }
}

impl Settings {
    /// Default layout rooted at `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load settings for the project at `root`.
    ///
    /// `file` defaults to `<root>/stacks.toml`; a missing file is not an error.
    pub fn load(root: &Path, file: Option<&Path>) -> Result<Self> {
        let file = file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(SETTINGS_FILE));

        let settings = config::Config::builder()
            .add_source(config::File::from(file.as_path()).required(false))
            .add_source(config::Environment::with_prefix("STACKS").separator("__"))
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        settings.root = root.to_path_buf();

        tracing::debug!(?settings, "loaded project settings");
        Ok(settings)
    }

    fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.root.join(dir)
        }
    }

    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.resolve(&self.config_dir)
    }

    #[must_use]
    pub fn src_dir(&self) -> PathBuf {
        self.resolve(&self.src_dir)
    }

    #[must_use]
    pub fn content_dir(&self) -> PathBuf {
        self.resolve(&self.content_dir)
    }

    #[must_use]
    pub fn public_dir(&self) -> PathBuf {
        self.resolve(&self.public_dir)
    }
}
