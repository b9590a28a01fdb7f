//! Rule-table validation of configuration trees.
//!
//! A [`Schema`] is a flat table of dot-separated paths and the [`Rule`] each
//! path must satisfy. Validation walks the whole table and collects every
//! violation into a single [`ValidationReport`].

use std::{collections::BTreeSet, fmt};

use regex::Regex;

use crate::{theme::THEMES, value::Value};

const HEX_COLOR: &str = r"^#[0-9A-Fa-f]{6}$";

/// Scalar type a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Boolean,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Integer(_) | Value::Float(_))
                | (Self::Boolean, Value::Bool(_))
        )
    }
}

/// Constraints for a single configuration path.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub required: bool,
    pub kind: Option<Kind>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
    pub one_of: Vec<String>,
}

impl Rule {
    #[must_use]
    pub fn string() -> Self {
        Self {
            kind: Some(Kind::String),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn number() -> Self {
        Self {
            kind: Some(Kind::Number),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self {
            kind: Some(Kind::Boolean),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    #[must_use]
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = allowed.into_iter().map(Into::into).collect();
        self
    }

    fn check(&self, path: &str, value: &Value, report: &mut ValidationReport) {
        if let Some(kind) = self.kind {
            if !kind.matches(value) {
                report.push(format!(
                    "{path} must be of type {}, got {}",
                    kind.name(),
                    value.kind()
                ));
                return;
            }
        }

        match value {
            Value::String(s) => self.check_string(path, s, report),
            Value::Integer(_) | Value::Float(_) => {
                if let Some(n) = value.as_f64() {
                    self.check_number(path, n, report);
                }
            }
            _ => {}
        }
    }

    fn check_string(&self, path: &str, s: &str, report: &mut ValidationReport) {
        let len = s.chars().count();
        if let Some(min) = self.min_length.filter(|min| len < *min) {
            report.push(format!("{path} must be at least {min} characters long"));
        }
        if let Some(max) = self.max_length.filter(|max| len > *max) {
            report.push(format!("{path} must be no more than {max} characters long"));
        }
        if let Some(pattern) = &self.pattern {
            match Regex::new(pattern) {
                Ok(re) if !re.is_match(s) => report.push(format!("{path} format is invalid")),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path, pattern = %pattern, error = %e, "invalid pattern rule");
                    report.push(format!("{path} has an invalid pattern rule"));
                }
            }
        }
        if !self.one_of.is_empty() && !self.one_of.iter().any(|allowed| allowed == s) {
            report.push(format!("{path} must be one of: {}", self.one_of.join(", ")));
        }
    }

    fn check_number(&self, path: &str, n: f64, report: &mut ValidationReport) {
        if let Some(min) = self.min.filter(|min| n < *min) {
            report.push(format!("{path} must be at least {min}"));
        }
        if let Some(max) = self.max.filter(|max| n > *max) {
            report.push(format!("{path} must be no more than {max}"));
        }
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<String>,
}

impl ValidationReport {
    fn push(&mut self, violation: String) {
        self.violations.push(violation);
    }

    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Configuration validation failed:")?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

/// A table of path rules.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<(String, Rule)>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a dot-separated path.
    #[must_use]
    pub fn field(mut self, path: impl Into<String>, rule: Rule) -> Self {
        self.rules.push((path.into(), rule));
        self
    }

    /// Validate `config`, returning every violation at once.
    pub fn validate(&self, config: &Value) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::default();
        let mut bad_groups = BTreeSet::new();

        for (path, rule) in &self.rules {
            if let Some(group) = non_mapping_ancestor(config, path) {
                if bad_groups.insert(group.to_string()) {
                    report.push(format!("{group} must be a mapping"));
                }
                continue;
            }

            match config.lookup(path) {
                None | Some(Value::Null) => {
                    if rule.required {
                        report.push(format!("{path} is required"));
                    }
                }
                Some(Value::String(s)) if s.is_empty() && rule.required => {
                    report.push(format!("{path} is required"));
                }
                Some(value) => rule.check(path, value, &mut report),
            }
        }

        if report.is_empty() {
            Ok(())
        } else {
            Err(report)
        }
    }
}

/// The first proper prefix of `path` that holds something other than a
/// mapping or null.
fn non_mapping_ancestor<'a>(config: &Value, path: &'a str) -> Option<&'a str> {
    let mut current = config;
    for (idx, _) in path.match_indices('.') {
        let prefix = &path[..idx];
        let key = prefix.rsplit('.').next().unwrap_or(prefix);
        match current.get(key) {
            Some(Value::Mapping(_)) => current = current.get(key)?,
            Some(Value::Null) | None => return None,
            Some(_) => return Some(prefix),
        }
    }
    None
}

/// The schema for `branding.yaml` and `deployment.yaml`.
#[must_use]
pub fn library_schema() -> Schema {
    Schema::new()
        .field(
            "branding.library.name",
            Rule::string().required().min_length(1).max_length(100),
        )
        .field("branding.library.tagline", Rule::string().max_length(200))
        .field("branding.library.description", Rule::string().max_length(500))
        .field("branding.library.author", Rule::string().required())
        .field("branding.library.organization", Rule::string())
        .field(
            "branding.library.website",
            Rule::string().pattern(r"^(https?://)?[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"),
        )
        .field("branding.colors.primary", Rule::string().pattern(HEX_COLOR))
        .field("branding.colors.secondary", Rule::string().pattern(HEX_COLOR))
        .field("branding.colors.accent", Rule::string().pattern(HEX_COLOR))
        .field("branding.colors.background", Rule::string().pattern(HEX_COLOR))
        .field("branding.colors.text", Rule::string().pattern(HEX_COLOR))
        .field("branding.typography.primary_font", Rule::string())
        .field("branding.typography.heading_font", Rule::string())
        .field("branding.typography.code_font", Rule::string())
        .field("branding.logo.enabled", Rule::boolean())
        .field("branding.logo.path", Rule::string())
        .field("branding.logo.alt_text", Rule::string())
        .field("branding.logo.width", Rule::number().range(16.0, 500.0))
        .field("branding.logo.height", Rule::number().range(16.0, 500.0))
        .field(
            "branding.theme",
            Rule::string().one_of(THEMES.iter().map(|theme| theme.name)),
        )
        .field("deployment.domain", Rule::string())
        .field("deployment.base_url", Rule::string().pattern(r"^https?://.+"))
        .field("deployment.seo.meta_description", Rule::string().max_length(160))
        .field("deployment.seo.keywords", Rule::string())
        .field("deployment.seo.author", Rule::string())
        .field("deployment.seo.og_image", Rule::string())
        .field(
            "deployment.analytics.google_analytics",
            Rule::string().pattern(r"^(G-[A-Z0-9]+)?$"),
        )
        .field("deployment.analytics.plausible", Rule::string())
        .field("deployment.github_pages.enabled", Rule::boolean())
        .field("deployment.github_pages.cname", Rule::boolean())
        .field(
            "deployment.github_pages.subdomain",
            Rule::string().pattern(r"^[a-z0-9-]+$"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).expect("valid yaml")
    }

    fn violations(config: &Value) -> Vec<String> {
        match library_schema().validate(config) {
            Ok(()) => Vec::new(),
            Err(report) => report.violations().to_vec(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = yaml(
            r##"
branding:
  library: { name: Acme Library, author: Ada, website: "https://acme.org" }
  colors: { primary: "#2563eb", accent: "#f59e0b" }
  logo: { enabled: true, width: 48 }
  theme: green-academic
deployment:
  base_url: https://acme.org
  analytics: { google_analytics: "" }
  github_pages: { enabled: true, subdomain: my-library }
"##,
        );
        assert!(violations(&config).is_empty(), "{:?}", violations(&config));
    }

    #[test]
    fn test_required_fields_reported() {
        let config = yaml("branding:\n  library:\n    name: ''\n");
        let found = violations(&config);
        assert_eq!(
            found,
            vec![
                "branding.library.name is required".to_string(),
                "branding.library.author is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_all_violations_aggregated() {
        let config = yaml(
            r##"
branding:
  library: { name: Acme, author: Ada }
  colors: { primary: "blue", secondary: "#12345" }
  logo: { width: 8, height: 900, enabled: "yes" }
  theme: neon
deployment:
  base_url: acme.org
"##,
        );
        let found = violations(&config);
        assert!(found.contains(&"branding.colors.primary format is invalid".to_string()));
        assert!(found.contains(&"branding.colors.secondary format is invalid".to_string()));
        assert!(found.contains(&"branding.logo.enabled must be of type boolean, got string".to_string()));
        assert!(found.contains(&"branding.logo.width must be at least 16".to_string()));
        assert!(found.contains(&"branding.logo.height must be no more than 500".to_string()));
        assert!(found.iter().any(|v| v.starts_with("branding.theme must be one of: blue-professional")));
        assert!(found.contains(&"deployment.base_url format is invalid".to_string()));
        assert_eq!(found.len(), 7);
    }

    #[test]
    fn test_website_and_analytics_patterns() {
        let mut config = yaml("branding:\n  library: { name: A, author: B }\n");
        config.set_path("branding.library.website", "https://acme.org/about");
        config.set_path("deployment.analytics.google_analytics", "UA-1234");
        assert_eq!(
            violations(&config),
            vec![
                "branding.library.website format is invalid",
                "deployment.analytics.google_analytics format is invalid",
            ]
        );

        config.set_path("branding.library.website", "acme.org");
        config.set_path("deployment.analytics.google_analytics", "");
        assert!(violations(&config).is_empty());
    }

    #[test]
    fn test_length_limits() {
        let long = "x".repeat(161);
        let mut config = yaml("branding:\n  library: { name: A, author: B }\n");
        config.set_path("deployment.seo.meta_description", long);
        assert_eq!(
            violations(&config),
            vec!["deployment.seo.meta_description must be no more than 160 characters long"]
        );
    }

    #[test]
    fn test_non_mapping_group_reported_once() {
        let config = yaml("branding:\n  library: { name: A, author: B }\n  colors: red\n");
        assert_eq!(violations(&config), vec!["branding.colors must be a mapping"]);
    }

    #[test]
    fn test_report_display() {
        let report = library_schema()
            .validate(&Value::mapping())
            .expect_err("missing required fields");
        let text = report.to_string();
        assert!(text.starts_with("Configuration validation failed:"));
        assert!(text.contains("\n  - branding.library.name is required"));
    }

    #[test]
    fn test_custom_schema_invalid_pattern() {
        let schema = Schema::new().field("a", Rule::string().pattern("("));
        let report = schema.validate(&yaml("a: x")).expect_err("bad pattern");
        assert_eq!(report.violations(), ["a has an invalid pattern rule"]);
    }
}
