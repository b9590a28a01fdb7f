//! Library configuration loading.
//!
//! `branding.yaml` and `deployment.yaml` are merged into one [`Value`] tree
//! under the keys `branding` and `deployment`; the parsed
//! `library-structure.md` is mounted under `structure`. The tree is built once
//! and only read afterwards.

use std::path::Path;

use crate::{
    error::{CoreError, Result},
    schema::{Schema, library_schema},
    structure::LibraryStructure,
    theme::resolve_colors,
    value::Value,
};

/// Branding document, required.
pub const BRANDING_FILE: &str = "branding.yaml";
/// Deployment document, optional.
pub const DEPLOYMENT_FILE: &str = "deployment.yaml";
/// Table of contents, optional.
pub const STRUCTURE_FILE: &str = "library-structure.md";
/// Markdown sources for static pages.
pub const PAGES_DIR: &str = "pages";
/// Logo and other images copied into the public directory.
pub const ASSETS_DIR: &str = "assets";

/// Default `branding.yaml` written by `stacks init`.
pub const DEFAULT_BRANDING: &str = include_str!("../defaults/branding.yaml");
/// Default `deployment.yaml` written by `stacks init`.
pub const DEFAULT_DEPLOYMENT: &str = include_str!("../defaults/deployment.yaml");
/// Default `library-structure.md` written by `stacks init`.
pub const DEFAULT_STRUCTURE: &str = include_str!("../defaults/library-structure.md");
/// Default static pages written by `stacks init`.
pub const DEFAULT_PAGES: &[(&str, &str)] = &[
    ("about.md", include_str!("../defaults/pages/about.md")),
    ("contact.md", include_str!("../defaults/pages/contact.md")),
    ("privacy.md", include_str!("../defaults/pages/privacy.md")),
    ("terms.md", include_str!("../defaults/pages/terms.md")),
];

/// Loaded library configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    context: Value,
    structure: Option<LibraryStructure>,
}

impl SiteConfig {
    /// Load every configuration document from `config_dir`.
    pub fn load(config_dir: &Path) -> Result<Self> {
        tracing::info!(dir = %config_dir.display(), "loading configuration");

        let branding_path = config_dir.join(BRANDING_FILE);
        if !branding_path.exists() {
            return Err(CoreError::config(format!(
                "{BRANDING_FILE} not found in {}",
                config_dir.display()
            )));
        }
        let branding = load_document(&branding_path)?;
        if branding.as_mapping().is_none() {
            return Err(CoreError::config(format!(
                "{} must contain a mapping",
                branding_path.display()
            )));
        }

        let deployment_path = config_dir.join(DEPLOYMENT_FILE);
        let deployment = if deployment_path.exists() {
            load_document(&deployment_path)?
        } else {
            tracing::debug!(path = %deployment_path.display(), "no deployment document");
            Value::mapping()
        };

        let structure_path = config_dir.join(STRUCTURE_FILE);
        let structure = if structure_path.exists() {
            Some(LibraryStructure::load(&structure_path)?)
        } else {
            None
        };

        let config = Self::from_documents(branding, deployment, structure);
        tracing::info!("configuration loaded");
        Ok(config)
    }

    /// Assemble a configuration from already-parsed documents.
    #[must_use]
    pub fn from_documents(
        branding: Value,
        deployment: Value,
        structure: Option<LibraryStructure>,
    ) -> Self {
        let mut context = Value::mapping();
        context.set_path("branding", branding);
        context.set_path(
            "deployment",
            if deployment.is_null() {
                Value::mapping()
            } else {
                deployment
            },
        );
        if let Some(structure) = &structure {
            context.set_path("structure", structure.to_value());
        }
        resolve_colors(&mut context);

        Self { context, structure }
    }

    /// The merged configuration tree templates resolve against.
    #[must_use]
    pub fn context(&self) -> &Value {
        &self.context
    }

    /// The parsed library structure, if the document exists.
    #[must_use]
    pub fn structure(&self) -> Option<&LibraryStructure> {
        self.structure.as_ref()
    }

    /// Validate against the library schema.
    pub fn validate(&self) -> Result<()> {
        self.validate_with(&library_schema())
    }

    /// Validate against a custom schema.
    pub fn validate_with(&self, schema: &Schema) -> Result<()> {
        schema.validate(&self.context).map_err(CoreError::Validation)
    }
}

fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| {
        CoreError::config_with_source(format!("Failed to parse {}", path.display()), e)
    })
}

/// The default configuration tree (`branding` and `deployment`).
pub fn defaults() -> Result<Value> {
    let branding: Value = serde_yaml::from_str(DEFAULT_BRANDING)?;
    let deployment: Value = serde_yaml::from_str(DEFAULT_DEPLOYMENT)?;

    let mut tree = Value::mapping();
    tree.set_path("branding", branding);
    tree.set_path("deployment", deployment);
    resolve_colors(&mut tree);
    Ok(tree)
}

/// Deep-merge a user tree over [`defaults`].
pub fn with_defaults(user: &Value) -> Result<Value> {
    Ok(defaults()?.merged_with(user))
}
