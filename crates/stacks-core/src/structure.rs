//! Library structure parsed from `library-structure.md`.
//!
//! The document is a markdown list: categories are unindented
//! `- [Name](slug)` lines and the items beneath them are the same link form
//! indented by two or more spaces.

use std::{path::Path, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    value::{Mapping, Value},
};

static LINK_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s*\[([^\]]+)\]\(([^)]+)\)$").expect("valid regex")
});

const SECTION_START: &str = "## Content Categories";
const SECTION_END: &str = "## How to Customize";

/// A single entry under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureItem {
    /// Link text.
    pub title: String,
    /// Path of the markdown file relative to the content directory.
    pub path: String,
}

impl StructureItem {
    /// The file stem of `path`, used as the item slug.
    #[must_use]
    pub fn slug(&self) -> String {
        Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
            .to_string()
    }
}

/// A category and its items, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub items: Vec<StructureItem>,
}

/// All categories of the library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStructure {
    pub categories: Vec<Category>,
}

impl LibraryStructure {
    /// Read and parse a structure file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse structure markdown.
    ///
    /// When the document has a `## Content Categories` heading only that
    /// section is read; it ends at a `---` rule or `## How to Customize`.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let link = &*LINK_ITEM;
        let sectioned = content.lines().any(|line| line.trim() == SECTION_START);
        let mut in_section = !sectioned;
        let mut categories: Vec<Category> = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed == SECTION_START {
                in_section = true;
                continue;
            }
            if sectioned && in_section && (trimmed.starts_with("---") || trimmed == SECTION_END) {
                break;
            }
            if !in_section || trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(caps) = link.captures(trimmed) else {
                continue;
            };
            let (text, target) = (caps[1].to_string(), caps[2].to_string());

            if line.starts_with("  ") {
                match categories.last_mut() {
                    Some(category) => category.items.push(StructureItem {
                        title: text,
                        path: target,
                    }),
                    None => tracing::debug!(title = %text, "item before any category, skipping"),
                }
            } else {
                categories.push(Category {
                    name: text,
                    slug: target,
                    items: Vec::new(),
                });
            }
        }

        Self { categories }
    }

    /// Total number of items across all categories.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// The structure as a template context subtree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let categories = self
            .categories
            .iter()
            .map(|category| {
                let items = category
                    .items
                    .iter()
                    .map(|item| {
                        let mut map = Mapping::new();
                        map.insert("title".to_string(), Value::from(item.title.as_str()));
                        map.insert("path".to_string(), Value::from(item.path.as_str()));
                        map.insert("slug".to_string(), Value::from(item.slug()));
                        Value::Mapping(map)
                    })
                    .collect();

                let mut map = Mapping::new();
                map.insert("name".to_string(), Value::from(category.name.as_str()));
                map.insert("slug".to_string(), Value::from(category.slug.as_str()));
                map.insert("items".to_string(), Value::Sequence(items));
                Value::Mapping(map)
            })
            .collect();

        let mut root = Mapping::new();
        root.insert("categories".to_string(), Value::Sequence(categories));
        Value::Mapping(root)
    }
}
