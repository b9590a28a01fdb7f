//! Frontmatter parsing for content and page files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Metadata at the top of a markdown document.
///
/// Every field is optional; callers supply their own fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Document title.
    #[serde(default)]
    pub title: Option<String>,

    /// Content type shown in the library listing (e.g. `article`, `book`).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Author override.
    #[serde(default)]
    pub author: Option<String>,

    /// Long description.
    #[serde(default)]
    pub description: Option<String>,

    /// Short summary, preferred over `description` in listings.
    #[serde(default)]
    pub summary: Option<String>,

    /// Any other keys.
    #[serde(default, flatten)]
    pub extra: std::collections::HashMap<String, serde_yaml::Value>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a string, returning it with the remaining body.
///
/// Content without frontmatter yields the default metadata and the full text.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    if fm_str.is_empty() {
        return Ok((Frontmatter::default(), body.to_string()));
    }

    let frontmatter: Frontmatter = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some content without frontmatter.";
        assert!(split_frontmatter(content).is_none());

        let (fm, body) = parse_frontmatter(content, Path::new("a.md")).expect("parse");
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: "Euclid's Elements"
type: book
author: Euclid
description: Thirteen books of geometry
---

Content here."#;

        let (fm, body) = parse_frontmatter(content, Path::new("elements.md")).expect("parse");

        assert_eq!(fm.title.as_deref(), Some("Euclid's Elements"));
        assert_eq!(fm.kind.as_deref(), Some("book"));
        assert_eq!(fm.author.as_deref(), Some("Euclid"));
        assert!(fm.summary.is_none());
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "Notes"
summary = "Short notes"
+++

Body"#;

        let (fm, body) = parse_frontmatter(content, Path::new("notes.md")).expect("parse");
        assert_eq!(fm.title.as_deref(), Some("Notes"));
        assert_eq!(fm.summary.as_deref(), Some("Short notes"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_extra_fields_kept() {
        let content = "---\ntitle: T\ncustom_field: value\n---\nBody";
        let (fm, _body) = parse_frontmatter(content, Path::new("t.md")).expect("parse");
        assert!(fm.extra.contains_key("custom_field"));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse_frontmatter(content, Path::new("bad.md")).unwrap_err();
        assert!(err.to_string().contains("bad.md"));
    }
}
