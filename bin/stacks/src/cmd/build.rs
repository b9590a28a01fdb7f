//! Build command - regenerates site files from the library configuration

use std::time::Instant;

use color_eyre::eyre::{Result, WrapErr};
use stacks_core::Settings;
use stacks_generator::{BuildStats, Builder};

use super::load_config;

/// Run the build command.
///
/// Validation runs first unless `skip_validation` is set; any violation aborts
/// the build with the full report.
pub fn run(settings: &Settings, skip_validation: bool) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(root = %settings.root.display(), skip_validation, "Starting build");

    let config = load_config(settings)?;

    if skip_validation {
        tracing::warn!("Skipping configuration validation");
    } else {
        config.validate().wrap_err("Invalid library configuration")?;
    }

    let stats = Builder::new(settings.clone(), config)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Categories:      {}", stats.categories);
    println!("  Indexed items:   {}", stats.indexed_items);
    println!("  Pages:           {}", stats.pages);
    println!("  Assets:          {}", stats.assets);
    println!("  Processed files: {}", stats.processed_files);
    println!();
    println!("  Duration:        {:.2}s", duration.as_secs_f64());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn project(branding: &str) -> TempDir {
        let root = TempDir::new().unwrap();
        let config_dir = root.path().join("library-config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("branding.yaml"), branding).unwrap();
        root
    }

    #[test]
    fn test_build_valid_project() {
        let root = project("library:\n  name: Acme\n  author: Ada\n");
        let settings = Settings::with_root(root.path());

        let stats = run(&settings, false).unwrap();
        assert_eq!(stats.pages, 0);
        assert!(root.path().join("src/styles/config-generated.css").exists());
    }

    #[test]
    fn test_invalid_config_aborts() {
        let root = project("library:\n  name: Acme\n");
        let settings = Settings::with_root(root.path());

        let err = run(&settings, false).unwrap_err();
        assert!(format!("{err:?}").contains("branding.library.author is required"));
        assert!(!root.path().join("src/styles/config-generated.css").exists());
    }

    #[test]
    fn test_skip_validation_builds_anyway() {
        let root = project("library:\n  name: Acme\n");
        let settings = Settings::with_root(root.path());

        assert!(run(&settings, true).is_ok());
        assert!(root.path().join("src/styles/config-generated.css").exists());
    }

    #[test]
    fn test_missing_config_is_error() {
        let root = TempDir::new().unwrap();
        let err = run(&Settings::with_root(root.path()), false).unwrap_err();
        assert!(format!("{err:?}").contains("stacks init"));
    }
}
