//! Stacks CLI Library
//!
//! Command implementations for the `stacks` binary, exposed as a library so
//! they can be driven from tests and other tools.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, process, check, init, reset)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use stacks::{Settings, cmd};
//!
//! let settings = Settings::load(Path::new("."), None).unwrap();
//! cmd::build::run(&settings, false).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use stacks_core::{Settings, SiteConfig};
pub use stacks_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
