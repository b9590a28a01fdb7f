//! Check command - validate the library configuration

use color_eyre::eyre::{Result, bail};
use stacks_core::{CoreError, Settings, SiteConfig, config::STRUCTURE_FILE};

/// Values that mean the template was never customised.
const PLACEHOLDERS: &[(&str, &str)] = &[
    ("branding.library.name", "[Your Library Name]"),
    ("branding.library.author", "[Your Name]"),
];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Collect every error and warning for the project.
#[must_use]
pub fn check(settings: &Settings) -> ValidationResult {
    let mut result = ValidationResult::default();
    let config_dir = settings.config_dir();

    let config = match SiteConfig::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };

    match config.validate() {
        Ok(()) => {}
        Err(CoreError::Validation(report)) => {
            for violation in report.violations() {
                result.add_error(violation.clone());
            }
        }
        Err(e) => result.add_error(e.to_string()),
    }

    for (path, placeholder) in PLACEHOLDERS {
        if config.context().lookup_str(path) == Some(*placeholder) {
            result.add_warning(format!("{path} still has the placeholder value {placeholder}"));
        }
    }

    if config.structure().is_none() {
        result.add_warning(format!(
            "{STRUCTURE_FILE} not found; the existing content index will be kept"
        ));
    }

    result
}

/// Run the check command.
pub fn run(settings: &Settings, strict: bool) -> Result<()> {
    tracing::info!(config = %settings.config_dir().display(), strict, "Checking configuration");

    println!("Checking configuration in {}...", settings.config_dir().display());
    let result = check(settings);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn project(branding: &str, structure: bool) -> TempDir {
        let root = TempDir::new().unwrap();
        let config_dir = root.path().join("library-config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("branding.yaml"), branding).unwrap();
        if structure {
            fs::write(config_dir.join(STRUCTURE_FILE), "- [Books](books)\n").unwrap();
        }
        root
    }

    #[test]
    fn test_clean_project_passes_strict() {
        let root = project("library:\n  name: Acme\n  author: Ada\n", true);
        let settings = Settings::with_root(root.path());

        let result = check(&settings);
        assert!(!result.has_errors(), "{:?}", result.errors);
        assert!(!result.has_warnings(), "{:?}", result.warnings);
        assert!(run(&settings, true).is_ok());
    }

    #[test]
    fn test_all_violations_reported() {
        let root = project(
            "library:\n  name: ''\n  website: not a site\ncolors:\n  primary: red\n",
            true,
        );
        let result = check(&Settings::with_root(root.path()));

        assert_eq!(result.errors.len(), 4, "{:?}", result.errors);
        assert!(result.errors.contains(&"branding.library.name is required".to_string()));
        assert!(result.errors.contains(&"branding.library.author is required".to_string()));
        assert!(result.errors.contains(&"branding.library.website format is invalid".to_string()));
        assert!(result.errors.contains(&"branding.colors.primary format is invalid".to_string()));
    }

    #[test]
    fn test_placeholders_are_warnings() {
        let root = project(
            "library:\n  name: \"[Your Library Name]\"\n  author: \"[Your Name]\"\n",
            false,
        );
        let settings = Settings::with_root(root.path());
        let result = check(&settings);

        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 3);
        assert!(run(&settings, false).is_ok());
        assert!(run(&settings, true).is_err());
    }

    #[test]
    fn test_missing_branding_is_error() {
        let root = TempDir::new().unwrap();
        let result = check(&Settings::with_root(root.path()));

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("branding.yaml not found"));
    }
}
