//! Build orchestration.
//!
//! Runs every generation step against a loaded configuration.

use std::{fs, path::Path, time::Instant};

use stacks_core::{
    Settings, SiteConfig,
    config::{ASSETS_DIR, PAGES_DIR},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assets::{ASSET_OUTPUT, AssetError, AssetProcessor},
    css::{CssError, CssGenerator},
    index::{IndexBuilder, IndexError},
    pages::{PageGenerator, PagesError},
    processor::TemplateProcessor,
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content index error.
    #[error("content index error: {0}")]
    Index(#[from] IndexError),

    /// CSS generation error.
    #[error("CSS error: {0}")]
    Css(#[from] CssError),

    /// Static page error.
    #[error("page error: {0}")]
    Pages(#[from] PagesError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Layout that imports the generated stylesheet.
pub const LAYOUT_FILE: &str = "layouts/Layout.astro";

const GLOBAL_CSS_IMPORT: &str = "import '../styles/global.css';";
const GENERATED_CSS_IMPORT: &str = "import '../styles/config-generated.css';";

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Items written to the content index.
    pub indexed_items: usize,

    /// Categories in the content index.
    pub categories: usize,

    /// Static pages generated.
    pub pages: usize,

    /// Assets copied.
    pub assets: usize,

    /// Source files rewritten by template processing.
    pub processed_files: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    settings: Settings,
    config: SiteConfig,
}

impl Builder {
    #[must_use]
    pub fn new(settings: Settings, config: SiteConfig) -> Self {
        Self { settings, config }
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();
        let src_dir = self.settings.src_dir();
        let config_dir = self.settings.config_dir();
        let context = self.config.context();

        info!(
            config = %config_dir.display(),
            src = %src_dir.display(),
            "starting build"
        );

        // 1. Content index
        match self.config.structure() {
            Some(structure) => {
                let index = IndexBuilder::new(
                    context,
                    self.settings.content_dir(),
                    self.settings.public_dir(),
                )
                .build(structure);
                index.write(&src_dir)?;
                stats.indexed_items = index.item_count();
                stats.categories = index.categories().len();
            }
            None => {
                warn!("no library structure found, keeping the existing content index");
            }
        }

        // 2. CSS variables
        CssGenerator::new(context).write(&src_dir)?;

        // 3. Static pages
        let pages = PageGenerator::new(context)
            .generate(&config_dir.join(PAGES_DIR), &src_dir.join("pages"))?;
        stats.pages = pages.len();

        // 4. Assets
        let manifest = AssetProcessor::new().process(
            &config_dir.join(ASSETS_DIR),
            &self.settings.public_dir().join(ASSET_OUTPUT),
        )?;
        stats.assets = manifest.len();

        // 5. Layout import, then in-place template processing
        link_generated_css(&src_dir)?;
        let processed = TemplateProcessor::new(&src_dir).process_all(context);
        stats.processed_files = processed.changed;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            indexed_items = stats.indexed_items,
            categories = stats.categories,
            pages = stats.pages,
            assets = stats.assets,
            processed_files = stats.processed_files,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }
}

/// Add the generated stylesheet import to the layout, once.
///
/// Returns whether the layout was modified.
pub fn link_generated_css(src_dir: &Path) -> std::io::Result<bool> {
    let layout = src_dir.join(LAYOUT_FILE);
    if !layout.is_file() {
        return Ok(false);
    }

    let content = fs::read_to_string(&layout)?;
    if content.contains("config-generated.css") || !content.contains(GLOBAL_CSS_IMPORT) {
        return Ok(false);
    }

    let updated = content.replacen(
        GLOBAL_CSS_IMPORT,
        &format!("{GLOBAL_CSS_IMPORT}\n{GENERATED_CSS_IMPORT}"),
        1,
    );
    fs::write(&layout, updated)?;
    debug!(path = %layout.display(), "linked generated CSS");
    Ok(true)
}

/// Remove the generated stylesheet import from the layout.
///
/// Returns whether the layout was modified.
pub fn unlink_generated_css(src_dir: &Path) -> std::io::Result<bool> {
    let layout = src_dir.join(LAYOUT_FILE);
    if !layout.is_file() {
        return Ok(false);
    }

    let content = fs::read_to_string(&layout)?;
    let line = format!("\n{GENERATED_CSS_IMPORT}");
    if !content.contains(&line) {
        return Ok(false);
    }

    fs::write(&layout, content.replacen(&line, "", 1))?;
    debug!(path = %layout.display(), "unlinked generated CSS");
    Ok(true)
}
