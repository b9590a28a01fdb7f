//! Process command - apply the template engine to site sources in place

use color_eyre::eyre::Result;
use stacks_core::Settings;
use stacks_generator::{ProcessStats, TemplateProcessor};

use super::load_config;

/// Run the process command.
pub fn run(settings: &Settings) -> Result<ProcessStats> {
    tracing::info!(src = %settings.src_dir().display(), "Processing templates");

    let config = load_config(settings)?;
    let stats = TemplateProcessor::new(settings.src_dir()).process_all(config.context());

    println!();
    println!("  Scanned: {}", stats.scanned);
    println!("  Changed: {}", stats.changed);
    if stats.failed > 0 {
        println!("  Failed:  {} (see log output)", stats.failed);
    }
    println!();

    Ok(stats)
}
