//! CLI command implementations.

pub mod build;
pub mod check;
pub mod init;
pub mod process;
pub mod reset;

use color_eyre::eyre::{Result, WrapErr};
use stacks_core::{Settings, SiteConfig};

/// Load the library configuration for `settings`.
pub fn load_config(settings: &Settings) -> Result<SiteConfig> {
    let config_dir = settings.config_dir();
    SiteConfig::load(&config_dir).wrap_err_with(|| {
        format!(
            "Failed to load configuration from {} (run `stacks init` to create one)",
            config_dir.display()
        )
    })
}
