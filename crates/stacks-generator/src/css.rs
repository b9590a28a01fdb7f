//! CSS custom properties generated from branding.

use std::{fs, path::Path};

use stacks_core::Value;
use thiserror::Error;
use tracing::info;

/// CSS generation errors.
#[derive(Debug, Error)]
pub enum CssError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CssError>;

/// Output path relative to `src/`.
pub const CSS_OUTPUT: &str = "styles/config-generated.css";

/// Renders `config-generated.css`.
#[derive(Debug)]
pub struct CssGenerator<'a> {
    context: &'a Value,
}

impl<'a> CssGenerator<'a> {
    #[must_use]
    pub fn new(context: &'a Value) -> Self {
        Self { context }
    }

    fn text(&self, path: &str, fallback: &str) -> String {
        match self.context.lookup(path) {
            Some(value) if value.is_truthy() => value.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Numeric dimensions are pixels; strings such as `auto` pass through.
    fn dimension(&self, path: &str, fallback: &str) -> String {
        match self.context.lookup(path) {
            Some(value @ (Value::Integer(_) | Value::Float(_))) if value.is_truthy() => {
                format!("{value}px")
            }
            Some(value) if value.is_truthy() => value.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// The stylesheet text.
    #[must_use]
    pub fn generate(&self) -> String {
        let name = self.text("branding.library.name", "[Your Library Name]");
        let tagline = self.text("branding.library.tagline", "Knowledge at your fingertips");

        let primary = self.text("branding.colors.primary", "#2563eb");
        let secondary = self.text("branding.colors.secondary", "#64748b");
        let background = self.text("branding.colors.background", "#ffffff");
        let text = self.text("branding.colors.text", "#1e293b");
        let accent = self.text("branding.colors.accent", "#f59e0b");

        let font_primary = self.text(
            "branding.typography.primary_font",
            "Inter, system-ui, sans-serif",
        );
        let font_heading = self.text(
            "branding.typography.heading_font",
            "Inter, system-ui, sans-serif",
        );
        let font_code = self.text(
            "branding.typography.code_font",
            "JetBrains Mono, Consolas, monospace",
        );
        let font_size = self.text("branding.typography.font_size_base", "16px");
        let line_height = self.text("branding.typography.line_height", "1.6");

        let logo_width = self.dimension("branding.logo.width", "200px");
        let logo_height = self.dimension("branding.logo.height", "auto");

        format!(
            r#"/* Generated CSS Variables - DO NOT EDIT MANUALLY */
/* Edit library-config/branding.yaml and run 'stacks build' to regenerate */

:root {{
  /* Library branding */
  --library-name: "{name}";
  --library-tagline: "{tagline}";

  /* Colors */
  --primary-color: {primary};
  --secondary-color: {secondary};
  --background-color: {background};
  --text-color: {text};
  --accent-color: {accent};
  --link-color: var(--primary-color);

  /* Typography */
  --font-primary: {font_primary};
  --font-heading: {font_heading};
  --font-code: {font_code};
  --font-size-base: {font_size};
  --line-height: {line_height};

  /* Logo */
  --logo-width: {logo_width};
  --logo-height: {logo_height};
}}

/* Dark mode overrides */
[data-theme="dark"] {{
  --background-color: #0f172a;
  --text-color: #e2e8f0;
  --secondary-color: #64748b;
}}

body {{
  font-family: var(--font-primary);
  font-size: var(--font-size-base);
  line-height: var(--line-height);
  color: var(--text-color);
  background-color: var(--background-color);
}}

h1, h2, h3, h4, h5, h6 {{
  font-family: var(--font-heading);
}}

code, pre {{
  font-family: var(--font-code);
}}

a {{
  color: var(--link-color);
}}

.primary-bg {{
  background-color: var(--primary-color);
}}

.accent-bg {{
  background-color: var(--accent-color);
}}
"#,
            name = css_string(&name),
            tagline = css_string(&tagline),
        )
    }

    /// Write the stylesheet under `src_dir`.
    pub fn write(&self, src_dir: &Path) -> Result<()> {
        let path = src_dir.join(CSS_OUTPUT);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.generate())?;

        info!(path = %path.display(), "generated CSS variables");
        Ok(())
    }
}

/// Escape a value for use inside a double-quoted CSS string.
fn css_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).expect("yaml")
    }

    #[test]
    fn test_values_from_branding() {
        let ctx = yaml(
            r##"
branding:
  library:
    name: Acme "Stacks"
    tagline: Read more
  colors:
    primary: "#059669"
  typography:
    code_font: Fira Code
  logo:
    width: 64
    height: auto
"##,
        );
        let css = CssGenerator::new(&ctx).generate();

        assert!(css.contains(r#"--library-name: "Acme \"Stacks\"";"#));
        assert!(css.contains(r#"--library-tagline: "Read more";"#));
        assert!(css.contains("--primary-color: #059669;"));
        assert!(css.contains("--font-code: Fira Code;"));
        assert!(css.contains("--logo-width: 64px;"));
        assert!(css.contains("--logo-height: auto;"));
        assert!(css.contains("--link-color: var(--primary-color);"));
    }

    #[test]
    fn test_fallbacks_for_empty_context() {
        let css = CssGenerator::new(&Value::mapping()).generate();

        assert!(css.contains(r#"--library-name: "[Your Library Name]";"#));
        assert!(css.contains("--primary-color: #2563eb;"));
        assert!(css.contains("--accent-color: #f59e0b;"));
        assert!(css.contains("--font-size-base: 16px;"));
        assert!(css.contains("--line-height: 1.6;"));
        assert!(css.contains("--logo-width: 200px;"));
        assert!(css.contains("--logo-height: auto;"));
        assert!(css.contains("[data-theme=\"dark\"]"));
    }

    #[test]
    fn test_write_creates_styles_dir() {
        let dir = TempDir::new().unwrap();
        CssGenerator::new(&Value::mapping()).write(dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join(CSS_OUTPUT)).unwrap();
        assert!(written.starts_with("/* Generated CSS Variables"));
    }
}
