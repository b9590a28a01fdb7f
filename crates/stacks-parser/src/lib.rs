//! Stacks Parser Library
//!
//! Markdown rendering for static pages and library content.

pub mod markdown;

use std::path::Path;

pub use markdown::{MarkdownParser, RenderedPage};
use thiserror::Error;

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Frontmatter could not be parsed.
    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] stacks_core::CoreError),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Whether `path` names a markdown document.
#[must_use]
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown"))
}
