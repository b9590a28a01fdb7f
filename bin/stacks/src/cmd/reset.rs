//! Reset command - remove generated files

use std::{fs, path::PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail};
use stacks_core::Settings;
use stacks_generator::{
    BuildStats, Builder,
    build::unlink_generated_css,
    css::CSS_OUTPUT,
    index::INDEX_OUTPUT,
    pages::is_generated,
};

use super::{
    init::{self, InitOptions},
    load_config,
};

/// Files the build produced under the source directory.
fn generated_files(settings: &Settings) -> Result<Vec<PathBuf>> {
    let src_dir = settings.src_dir();
    let mut files: Vec<PathBuf> = [CSS_OUTPUT, INDEX_OUTPUT]
        .iter()
        .map(|rel| src_dir.join(rel))
        .filter(|path| path.is_file())
        .collect();

    let pages_dir = src_dir.join("pages");
    if pages_dir.is_dir() {
        let mut pages = Vec::new();
        for entry in fs::read_dir(&pages_dir).wrap_err("Failed to read pages directory")? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let content = fs::read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            if is_generated(&content) {
                pages.push(path);
            }
        }
        pages.sort();
        files.extend(pages);
    }

    Ok(files)
}

/// Write the default configuration and rebuild the site from it.
fn restore_defaults(settings: &Settings) -> Result<BuildStats> {
    let options = InitOptions {
        force: true,
        ..Default::default()
    };
    init::run(settings, &options)?;

    let config = load_config(settings)?;
    let stats = Builder::new(settings.clone(), config)
        .build()
        .wrap_err("Failed to rebuild with the default configuration")?;

    println!("Rebuilt {} page(s) from the default configuration", stats.pages);
    Ok(stats)
}

/// Run the reset command, returning the paths removed.
///
/// With `all`, the configuration directory is replaced by the defaults and
/// the site is rebuilt from them.
pub fn run(settings: &Settings, all: bool, yes: bool) -> Result<Vec<PathBuf>> {
    if all && !yes {
        bail!(
            "--all replaces {} with the defaults; pass --yes to confirm",
            settings.config_dir().display()
        );
    }

    tracing::info!(all, "Resetting generated files");

    let mut removed = generated_files(settings)?;
    for path in &removed {
        fs::remove_file(path).wrap_err_with(|| format!("Failed to remove {}", path.display()))?;
        println!("Removed: {}", path.display());
    }

    if unlink_generated_css(&settings.src_dir()).wrap_err("Failed to update layout")? {
        println!("Unlinked generated CSS from the layout");
    }

    let config_dir = settings.config_dir();
    if all && config_dir.exists() {
        fs::remove_dir_all(&config_dir)
            .wrap_err_with(|| format!("Failed to remove {}", config_dir.display()))?;
        println!("Removed: {}", config_dir.display());
        removed.push(config_dir);
    }

    if all {
        restore_defaults(settings)?;
    }

    if removed.is_empty() {
        println!("Nothing to reset");
    }

    Ok(removed)
}
