//! stacks core library
//!
//! Configuration tree, document loading, schema validation, theme presets and
//! library-structure parsing shared by the stacks crates.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod schema;
pub mod settings;
pub mod structure;
pub mod theme;
pub mod value;

pub use config::SiteConfig;
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
pub use schema::{Rule, Schema, ValidationReport};
pub use settings::Settings;
pub use structure::{Category, LibraryStructure, StructureItem};
pub use theme::Theme;
pub use value::{Mapping, Value};
