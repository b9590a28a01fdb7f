//! Static pages rendered from `library-config/pages/*.md`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use stacks_core::Value;
use stacks_parser::{MarkdownParser, ParserError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::template::{Template, replace_placeholders};

/// Page generation errors.
#[derive(Debug, Error)]
pub enum PagesError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Markdown could not be parsed.
    #[error("failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: ParserError,
    },
}

pub type Result<T> = std::result::Result<T, PagesError>;

/// Every generated page starts with this comment.
pub const GENERATED_MARKER: &str = "<!-- Generated from ";

const EMAIL_PLACEHOLDER: &str = "[your.email@example.com](mailto:your.email@example.com)";
const WEBSITE_PLACEHOLDER: &str = "yourwebsite.com";
const DATE_PLACEHOLDER: &str = "[Month] [Day], [Year]";

const PAGE_SHELL: &str = r#"{{page.marker}}
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{page.title}}{{#if branding.library.name}} | {{branding.library.name}}{{/if}}</title>
  <link rel="stylesheet" href="/styles/config-generated.css">
  <style>
    .content-page { max-width: 800px; margin: 0 auto; padding: 2rem; }
    .markdown-content { line-height: 1.7; }
    .markdown-content h1 {
      color: var(--primary-color);
      border-bottom: 2px solid var(--primary-color);
      padding-bottom: 0.5rem;
      margin-bottom: 2rem;
    }
    .markdown-content h2 { color: var(--text-color); margin-top: 2rem; margin-bottom: 1rem; }
    .markdown-content h3 { color: var(--secondary-color); margin-top: 1.5rem; margin-bottom: 0.75rem; }
    .markdown-content a { color: var(--link-color); text-decoration: underline; }
    .markdown-content code {
      background-color: var(--secondary-color);
      color: var(--background-color);
      padding: 0.2rem 0.4rem;
      border-radius: 0.25rem;
    }
    .markdown-content blockquote {
      border-left: 4px solid var(--accent-color);
      padding-left: 1rem;
      font-style: italic;
      color: var(--secondary-color);
    }
  </style>
</head>
<body>
  <main class="content-page" data-page="/{{page.name}}/">
    <div class="markdown-content">
{{page.content}}
    </div>
  </main>
</body>
</html>
"#;

/// Name of the generated file for a page source stem.
#[must_use]
pub fn output_name(stem: &str) -> String {
    match stem {
        "terms" => "terms-conditions".to_string(),
        "privacy" => "privacy-policy".to_string(),
        other => other.to_string(),
    }
}

/// Replace the placeholders page sources ship with.
///
/// Bracket placeholders come first, then the contact email link, the bare
/// example domain and the `[Month] [Day], [Year]` date.
#[must_use]
pub fn prepare_markdown(markdown: &str, context: &Value, today: NaiveDate) -> String {
    let mut text = replace_placeholders(markdown, context);

    if let Some(email) = context
        .lookup("deployment.contact_email")
        .filter(|v| v.is_truthy())
    {
        text = text.replace(EMAIL_PLACEHOLDER, &format!("[{email}](mailto:{email})"));
    }

    if let Some(website) = context
        .lookup("branding.library.website")
        .filter(|v| v.is_truthy())
    {
        let website = website.to_string();
        let host = website
            .strip_prefix("https://")
            .or_else(|| website.strip_prefix("http://"))
            .unwrap_or(&website)
            .trim_end_matches('/');
        text = text.replace(WEBSITE_PLACEHOLDER, host);
    }

    text.replace(DATE_PLACEHOLDER, &today.format("%B %-d, %Y").to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders page markdown into standalone HTML files.
#[derive(Debug)]
pub struct PageGenerator<'a> {
    context: &'a Value,
    parser: MarkdownParser,
    shell: Template,
    today: NaiveDate,
}

impl<'a> PageGenerator<'a> {
    #[must_use]
    pub fn new(context: &'a Value) -> Self {
        Self {
            context,
            parser: MarkdownParser::new(),
            shell: Template::new("page", PAGE_SHELL),
            today: Local::now().date_naive(),
        }
    }

    /// Fix the date used for `[Month] [Day], [Year]`.
    #[must_use]
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Render one page source.
    ///
    /// `source_label` is the path written into the generated marker.
    pub fn render(&self, stem: &str, markdown: &str, source_label: &str) -> Result<String> {
        let prepared = prepare_markdown(markdown, self.context, self.today);
        let page = self
            .parser
            .parse(&prepared, Path::new(source_label))
            .map_err(|source| PagesError::Render {
                path: PathBuf::from(source_label),
                source,
            })?;

        let title = page
            .frontmatter
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| capitalize(stem));

        let mut scope = self.context.clone();
        if scope.as_mapping().is_none() {
            scope = Value::mapping();
        }
        scope.set_path("page.marker", format!("{GENERATED_MARKER}{source_label} -->"));
        scope.set_path("page.title", title);
        scope.set_path("page.name", stem);
        scope.set_path("page.content", page.html);

        Ok(self.shell.render(&scope))
    }

    /// Render every `*.md` in `pages_dir` into `output_dir`.
    ///
    /// Returns the paths written. A page that cannot be read or rendered is
    /// logged and skipped.
    pub fn generate(&self, pages_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        if !pages_dir.is_dir() {
            warn!(dir = %pages_dir.display(), "no pages directory, skipping static pages");
            return Ok(Vec::new());
        }

        let mut sources: Vec<PathBuf> = fs::read_dir(pages_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && stacks_parser::is_markdown(path))
            .collect();
        sources.sort();

        let label_dir = pages_label(pages_dir);
        fs::create_dir_all(output_dir)?;

        let mut written = Vec::with_capacity(sources.len());
        for source in sources {
            let Some(stem) = source.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let file_name = source
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(stem);
            let label = format!("{label_dir}/{file_name}");

            let markdown = match fs::read_to_string(&source) {
                Ok(markdown) => markdown,
                Err(e) => {
                    warn!(path = %source.display(), error = %e, "failed to read page");
                    continue;
                }
            };
            let html = match self.render(stem, &markdown, &label) {
                Ok(html) => html,
                Err(e) => {
                    warn!(path = %source.display(), error = %e, "failed to render page");
                    continue;
                }
            };

            let output = output_dir.join(format!("{}.html", output_name(stem)));
            fs::write(&output, html)?;
            debug!(source = %source.display(), output = %output.display(), "generated page");
            written.push(output);
        }

        info!(count = written.len(), "generated static pages");
        Ok(written)
    }
}

/// `library-config/pages` style label from the last two path components.
fn pages_label(pages_dir: &Path) -> String {
    let parts: Vec<String> = pages_dir
        .components()
        .rev()
        .take(2)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.into_iter().rev().collect::<Vec<_>>().join("/")
}

/// Whether `content` was produced by [`PageGenerator`].
#[must_use]
pub fn is_generated(content: &str) -> bool {
    content.starts_with(GENERATED_MARKER)
}
