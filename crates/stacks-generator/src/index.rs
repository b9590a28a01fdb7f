//! The library content index consumed by the site.
//!
//! Each structure item whose markdown exists becomes a [`ContentItem`];
//! categories keep the order of `library-structure.md`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use serde::{Serialize, Serializer, ser::SerializeMap};
use stacks_core::{
    Category, LibraryStructure, StructureItem, Value, frontmatter::parse_frontmatter,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Content index errors.
#[derive(Debug, Error)]
pub enum IndexError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;

/// Output path relative to `src/`.
pub const INDEX_OUTPUT: &str = "data/library_content.json";

const DEFAULT_KIND: &str = "article";
const DEFAULT_AUTHOR: &str = "[Your Name]";

/// One document in the library listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub summary: String,
    /// Set only when a matching PDF exists under `public/pdfs/`.
    #[serde(rename = "pdfUrl")]
    pub pdf_url: Option<String>,
    #[serde(rename = "markdownUrl")]
    pub markdown_url: String,
}

/// Items grouped by category slug, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    categories: Vec<(String, Vec<ContentItem>)>,
}

impl ContentIndex {
    /// Categories with their items.
    #[must_use]
    pub fn categories(&self) -> &[(String, Vec<ContentItem>)] {
        &self.categories
    }

    /// Items of one category.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&[ContentItem]> {
        self.categories
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, items)| items.as_slice())
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|(_, items)| items.len()).sum()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the index under `src_dir`.
    pub fn write(&self, src_dir: &Path) -> Result<PathBuf> {
        let path = src_dir.join(INDEX_OUTPUT);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.to_json()?)?;

        info!(
            path = %path.display(),
            categories = self.categories.len(),
            items = self.item_count(),
            "wrote content index"
        );
        Ok(path)
    }
}

impl Serialize for ContentIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (slug, items) in &self.categories {
            map.serialize_entry(slug, items)?;
        }
        map.end()
    }
}

/// Builds a [`ContentIndex`] from the structure and the content directory.
#[derive(Debug)]
pub struct IndexBuilder<'a> {
    context: &'a Value,
    content_dir: PathBuf,
    public_dir: PathBuf,
}

impl<'a> IndexBuilder<'a> {
    #[must_use]
    pub fn new(
        context: &'a Value,
        content_dir: impl Into<PathBuf>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            context,
            content_dir: content_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    /// Index every item of `structure`.
    ///
    /// Items without a markdown file are skipped; categories are always kept.
    #[must_use]
    pub fn build(&self, structure: &LibraryStructure) -> ContentIndex {
        info!(
            dir = %self.content_dir.display(),
            categories = structure.categories.len(),
            "building content index"
        );

        let categories = structure
            .categories
            .iter()
            .map(|category| {
                let items = category
                    .items
                    .par_iter()
                    .filter_map(|item| self.index_item(category, item))
                    .collect();
                (category.slug.clone(), items)
            })
            .collect();

        ContentIndex { categories }
    }

    fn index_item(&self, category: &Category, item: &StructureItem) -> Option<ContentItem> {
        let markdown_path = self.content_dir.join(&item.path);
        let content = match fs::read_to_string(&markdown_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %markdown_path.display(), error = %e, "markdown file not found, skipping");
                return None;
            }
        };

        let frontmatter = match parse_frontmatter(&content, &markdown_path) {
            Ok((frontmatter, _)) => frontmatter,
            Err(e) => {
                warn!(path = %markdown_path.display(), error = %e, "ignoring unparseable frontmatter");
                Default::default()
            }
        };

        let author = frontmatter.author.clone().unwrap_or_else(|| {
            self.context
                .lookup("branding.library.author")
                .filter(|v| v.is_truthy())
                .map_or_else(|| DEFAULT_AUTHOR.to_string(), ToString::to_string)
        });

        let summary = frontmatter
            .description
            .clone()
            .or_else(|| frontmatter.summary.clone())
            .unwrap_or_else(|| format!("{} - part of {}", item.title, category.name));

        let pdf_relative = Path::new(&item.path).with_extension("pdf");
        let pdf_url = self
            .public_dir
            .join("pdfs")
            .join(&pdf_relative)
            .is_file()
            .then(|| format!("/pdfs/{}", url_path(&pdf_relative)));

        debug!(slug = %item.slug(), pdf = pdf_url.is_some(), "indexed item");

        Some(ContentItem {
            kind: frontmatter.kind.unwrap_or_else(|| DEFAULT_KIND.to_string()),
            title: frontmatter.title.unwrap_or_else(|| item.title.clone()),
            slug: item.slug(),
            author,
            summary,
            pdf_url,
            markdown_url: format!("/content/{}", item.path),
        })
    }
}

fn url_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
