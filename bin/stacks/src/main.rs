//! Stacks CLI
//!
//! Configures a templated digital-library site from `library-config/`.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use stacks::{Settings, cmd::init::InitOptions};

/// Command-line interface for Stacks.
#[derive(Parser)]
#[command(
    name = "stacks",
    version,
    about = "Apply library branding and content to a site template"
)]
struct Cli {
    /// Project root
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Path to a settings file (defaults to <root>/stacks.toml)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate the configuration and generate every site file
    Build {
        /// Build even when the configuration has violations
        #[arg(long)]
        skip_validation: bool,
    },
    /// Apply the configuration to site sources only
    Process,
    /// Validate the configuration
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Write a default library configuration
    Init {
        /// Library name
        #[arg(long)]
        name: Option<String>,
        /// Author name
        #[arg(long)]
        author: Option<String>,
        /// Organization (defaults to the author)
        #[arg(long)]
        organization: Option<String>,
        /// Website URL
        #[arg(long)]
        website: Option<String>,
        /// Color theme preset
        #[arg(long)]
        theme: Option<String>,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Remove generated files
    Reset {
        /// Also replace the configuration with the defaults and rebuild
        #[arg(long)]
        all: bool,
        /// Confirm destructive operations
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    stacks::init_tracing(cli.verbose);

    let settings = Settings::load(&cli.root, cli.settings.as_deref())
        .wrap_err("Failed to load project settings")?;

    match cli.command {
        Commands::Build { skip_validation } => {
            stacks::cmd::build::run(&settings, skip_validation)?;
        }
        Commands::Process => {
            stacks::cmd::process::run(&settings)?;
        }
        Commands::Check { strict } => {
            stacks::cmd::check::run(&settings, strict)?;
        }
        Commands::Init {
            name,
            author,
            organization,
            website,
            theme,
            force,
        } => {
            let options = InitOptions {
                name,
                author,
                organization,
                website,
                theme,
                force,
            };
            stacks::cmd::init::run(&settings, &options)?;
        }
        Commands::Reset { all, yes } => {
            stacks::cmd::reset::run(&settings, all, yes)?;
        }
    }

    Ok(())
}
