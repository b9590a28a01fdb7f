//! Markdown renderer using pulldown-cmark.

use std::path::Path;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use stacks_core::frontmatter::{Frontmatter, parse_frontmatter};

use crate::Result;

/// A markdown document rendered to HTML.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub frontmatter: Frontmatter,
    pub html: String,
}

/// Markdown parser with the extensions library pages use.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a parser with tables, footnotes, strikethrough and task lists.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Parse markdown content with frontmatter.
    pub fn parse(&self, content: &str, path: &Path) -> Result<RenderedPage> {
        let (frontmatter, body) = parse_frontmatter(content, path)?;
        let html = self.render(&body);

        tracing::trace!(path = %path.display(), "rendered markdown");

        Ok(RenderedPage { frontmatter, html })
    }

    /// Render a markdown body, giving every heading an anchor id.
    ///
    /// Headings with an explicit `{#id}` attribute keep it.
    pub fn render(&self, body: &str) -> String {
        let mut events: Vec<Event> = Parser::new_ext(body, self.options).collect();

        let mut i = 0;
        while i < events.len() {
            let Event::Start(Tag::Heading { id, .. }) = &events[i] else {
                i += 1;
                continue;
            };
            let explicit = id.as_ref().map(|id| id.to_string());

            let mut text = String::new();
            let mut end = i + 1;
            while end < events.len() {
                match &events[end] {
                    Event::End(TagEnd::Heading(_)) => break,
                    Event::Text(t) | Event::Code(t) => text.push_str(t),
                    _ => {}
                }
                end += 1;
            }

            let anchor = explicit.unwrap_or_else(|| slugify(&text));
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(anchor));
            }
            i = end + 1;
        }

        let mut out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Convert text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
