//! Stacks Generator Library
//!
//! Turns a loaded library configuration into site files.
//!
//! # Modules
//!
//! - [`template`] - Directive substitution engine
//! - [`processor`] - In-place processing of site sources
//! - [`index`] - Library content index
//! - [`css`] - CSS custom properties from branding
//! - [`pages`] - Static pages from markdown
//! - [`assets`] - Branding asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod css;
pub mod index;
pub mod pages;
pub mod processor;
pub mod template;

pub use assets::{AssetManifest, AssetProcessor};
pub use build::{BuildStats, Builder};
pub use css::CssGenerator;
pub use index::{ContentIndex, ContentItem, IndexBuilder};
pub use pages::PageGenerator;
pub use processor::{ProcessStats, TemplateProcessor};
pub use template::{Template, process};
