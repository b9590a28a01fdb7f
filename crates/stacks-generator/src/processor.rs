//! In-place template processing of site sources.
//!
//! Walks the component, layout and page directories and rewrites every file
//! whose directives resolved to something new.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use stacks_core::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::template;

/// Source directories scanned recursively, relative to `src/`.
pub const TEMPLATE_DIRS: &[&str] = &["components", "layouts", "pages"];

/// Extensions of files that may carry directives.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["astro", "css", "js", "html"];

/// Extra files processed outside [`TEMPLATE_DIRS`].
pub const EXTRA_FILES: &[&str] = &["styles/global.css"];

/// Outcome of a processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Files read.
    pub scanned: usize,
    /// Files rewritten because processing changed them.
    pub changed: usize,
    /// Files skipped after a read or write error.
    pub failed: usize,
}

/// Applies the template engine to every source file under `src/`.
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    src_dir: PathBuf,
}

impl TemplateProcessor {
    #[must_use]
    pub fn new(src_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
        }
    }

    /// Every file the processor would touch, sorted.
    #[must_use]
    pub fn template_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = TEMPLATE_DIRS
            .iter()
            .map(|dir| self.src_dir.join(dir))
            .filter(|dir| dir.is_dir())
            .flat_map(|dir| {
                WalkDir::new(dir)
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            warn!(error = %e, "skipping unreadable entry");
                            None
                        }
                    })
                    .filter(|entry| entry.file_type().is_file())
                    .map(walkdir::DirEntry::into_path)
                    .filter(|path| has_template_extension(path))
                    .collect::<Vec<_>>()
            })
            .collect();

        files.extend(
            EXTRA_FILES
                .iter()
                .map(|file| self.src_dir.join(file))
                .filter(|path| path.is_file()),
        );

        files.sort();
        files.dedup();
        files
    }

    /// Process every template file against `context`.
    ///
    /// Failures are logged per file and never abort the run.
    pub fn process_all(&self, context: &Value) -> ProcessStats {
        let files = self.template_files();
        info!(dir = %self.src_dir.display(), files = files.len(), "processing templates");

        let results: Vec<io::Result<bool>> = files
            .par_iter()
            .map(|path| process_file(path, context))
            .collect();

        let mut stats = ProcessStats::default();
        for (path, result) in files.iter().zip(results) {
            match result {
                Ok(changed) => {
                    stats.scanned += 1;
                    if changed {
                        stats.changed += 1;
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to process template");
                    stats.failed += 1;
                }
            }
        }

        info!(
            scanned = stats.scanned,
            changed = stats.changed,
            failed = stats.failed,
            "template processing complete"
        );
        stats
    }
}

/// Process one file in place; returns whether it was rewritten.
pub fn process_file(path: &Path, context: &Value) -> io::Result<bool> {
    let original = fs::read_to_string(path)?;
    let processed = template::process(&original, context);

    if processed == original {
        return Ok(false);
    }

    fs::write(path, processed)?;
    debug!(path = %path.display(), "processed template");
    Ok(true)
}

fn has_template_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext))
}
