//! Init command - write a default library configuration

use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr, bail};
use stacks_core::{
    CoreError, Settings, Value,
    config::{
        ASSETS_DIR, BRANDING_FILE, DEFAULT_BRANDING, DEFAULT_DEPLOYMENT, DEFAULT_PAGES,
        DEFAULT_STRUCTURE, DEPLOYMENT_FILE, PAGES_DIR, STRUCTURE_FILE, with_defaults,
    },
    schema::library_schema,
    theme::apply_theme,
};

const ASSETS_README: &str = r#"# Assets Directory

Files placed here are copied to `public/images/` by `stacks build`:

- **logo.png** - Your library logo (recommended size: 400x100px)
- **favicon.ico** - Your favicon
- **social-preview.png** - Social media preview image (1200x630px)

This README and `*.placeholder` files are not copied.
"#;

const BRANDING_HEADER: &str = "# Branding for your digital library.\n\
# Generated by `stacks init`; edit these values, then run `stacks build`.\n\n";

const DEPLOYMENT_HEADER: &str = "# Deployment settings for your digital library.\n\
# Generated by `stacks init`; edit these values, then run `stacks build`.\n\n";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub name: Option<String>,
    pub author: Option<String>,
    pub organization: Option<String>,
    pub website: Option<String>,
    pub theme: Option<String>,
    pub force: bool,
}

impl InitOptions {
    fn is_customized(&self) -> bool {
        self.name.is_some()
            || self.author.is_some()
            || self.organization.is_some()
            || self.website.is_some()
            || self.theme.is_some()
    }
}

/// Prefix `https://` when the website has no scheme.
#[must_use]
pub fn normalize_website(website: &str) -> String {
    let website = website.trim();
    if website.starts_with("http://") || website.starts_with("https://") {
        website.to_string()
    } else {
        format!("https://{website}")
    }
}

/// Values from the command line as a tree to merge over the defaults.
fn overrides(options: &InitOptions) -> Value {
    let mut overrides = Value::mapping();

    if let Some(name) = &options.name {
        overrides.set_path("branding.library.name", name.as_str());
    }
    if let Some(author) = &options.author {
        overrides.set_path("branding.library.author", author.as_str());
        overrides.set_path("deployment.seo.author", author.as_str());
    }
    if let Some(organization) = options.organization.as_ref().or(options.author.as_ref()) {
        overrides.set_path("branding.library.organization", organization.as_str());
    }
    if let Some(website) = &options.website {
        overrides.set_path("branding.library.website", normalize_website(website));
    }

    overrides
}

/// The configuration tree `init` writes, validated.
pub fn configuration(options: &InitOptions) -> Result<Value> {
    let mut tree = with_defaults(&overrides(options)).wrap_err("Bundled defaults are invalid")?;

    if let Some(theme) = &options.theme {
        apply_theme(&mut tree, theme)?;
    }

    library_schema()
        .validate(&tree)
        .map_err(CoreError::Validation)
        .wrap_err("Refusing to write an invalid configuration")?;

    Ok(tree)
}

/// Run the init command, returning the files written.
pub fn run(settings: &Settings, options: &InitOptions) -> Result<Vec<PathBuf>> {
    let config_dir = settings.config_dir();
    tracing::info!(dir = %config_dir.display(), force = options.force, "Initializing library configuration");

    let tree = configuration(options)?;

    let (branding, deployment) = if options.is_customized() {
        (
            document(&tree, "branding", BRANDING_HEADER)?,
            document(&tree, "deployment", DEPLOYMENT_HEADER)?,
        )
    } else {
        (DEFAULT_BRANDING.to_string(), DEFAULT_DEPLOYMENT.to_string())
    };

    let mut files: Vec<(PathBuf, String)> = vec![
        (config_dir.join(BRANDING_FILE), branding),
        (config_dir.join(DEPLOYMENT_FILE), deployment),
        (config_dir.join(STRUCTURE_FILE), DEFAULT_STRUCTURE.to_string()),
        (config_dir.join(ASSETS_DIR).join("README.md"), ASSETS_README.to_string()),
        (
            config_dir.join(ASSETS_DIR).join("logo.png.placeholder"),
            "Add your logo.png file here\n".to_string(),
        ),
    ];
    files.extend(
        DEFAULT_PAGES
            .iter()
            .map(|(name, content)| (config_dir.join(PAGES_DIR).join(name), (*content).to_string())),
    );

    if !options.force {
        let existing: Vec<String> = files
            .iter()
            .filter(|(path, _)| path.exists())
            .map(|(path, _)| path.display().to_string())
            .collect();
        if !existing.is_empty() {
            bail!(
                "Refusing to overwrite existing files (use --force):\n  {}",
                existing.join("\n  ")
            );
        }
    }

    for (path, content) in &files {
        write_file(path, content)?;
        println!("Created: {}", path.display());
    }

    println!();
    println!("Next: edit {} and run `stacks build`.", config_dir.join(BRANDING_FILE).display());

    Ok(files.into_iter().map(|(path, _)| path).collect())
}

/// One top-level section of `tree` as a YAML document.
fn document(tree: &Value, key: &str, header: &str) -> Result<String> {
    let section = tree.get(key).cloned().unwrap_or_else(Value::mapping);
    let yaml = serde_yaml::to_string(&section)
        .wrap_err_with(|| format!("Failed to serialize {key}"))?;
    Ok(format!("{header}{yaml}"))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }
    fs::write(path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}
