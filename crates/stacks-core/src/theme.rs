//! Color theme presets.

use crate::{
    error::{CoreError, Result},
    value::{Mapping, Value},
};

/// Theme applied when a configuration names neither a theme nor colors.
pub const DEFAULT_THEME: &str = "blue-professional";

/// A named color preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

/// All built-in presets, in the order they are offered to users.
pub const THEMES: &[Theme] = &[
    Theme {
        name: "blue-professional",
        primary: "#2563eb",
        secondary: "#64748b",
        background: "#ffffff",
        text: "#1e293b",
        accent: "#f59e0b",
    },
    Theme {
        name: "green-academic",
        primary: "#059669",
        secondary: "#6b7280",
        background: "#ffffff",
        text: "#1f2937",
        accent: "#d97706",
    },
    Theme {
        name: "purple-creative",
        primary: "#7c3aed",
        secondary: "#6b7280",
        background: "#ffffff",
        text: "#1f2937",
        accent: "#ec4899",
    },
    Theme {
        name: "orange-warm",
        primary: "#ea580c",
        secondary: "#6b7280",
        background: "#ffffff",
        text: "#1f2937",
        accent: "#8b5cf6",
    },
    Theme {
        name: "gray-minimal",
        primary: "#374151",
        secondary: "#9ca3af",
        background: "#ffffff",
        text: "#111827",
        accent: "#6366f1",
    },
];

impl Theme {
    /// Find a preset by name.
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|theme| theme.name == name)
    }

    /// Comma-separated preset names.
    #[must_use]
    pub fn names() -> String {
        THEMES
            .iter()
            .map(|theme| theme.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The preset colors as a `colors` mapping.
    #[must_use]
    pub fn colors(&self) -> Value {
        let mut colors = Mapping::new();
        for (key, color) in [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("background", self.background),
            ("text", self.text),
            ("accent", self.accent),
        ] {
            colors.insert(key.to_string(), Value::from(color));
        }
        Value::Mapping(colors)
    }
}

/// Resolve `branding.colors` against `branding.theme`.
///
/// A known theme provides the base colors and explicit `colors` entries win.
/// Without a known theme, explicit colors are kept as they are, and a
/// configuration with no colors at all falls back to [`DEFAULT_THEME`].
pub fn resolve_colors(config: &mut Value) {
    let theme = config
        .lookup_str("branding.theme")
        .and_then(Theme::find);
    let custom = config
        .lookup("branding.colors")
        .filter(|colors| colors.as_mapping().is_some())
        .cloned();

    let resolved = match (theme, custom) {
        (Some(theme), Some(custom)) => theme.colors().merged_with(&custom),
        (Some(theme), None) => theme.colors(),
        (None, Some(custom)) if custom.is_truthy() => return,
        (None, _) => match Theme::find(DEFAULT_THEME) {
            Some(theme) => theme.colors(),
            None => return,
        },
    };

    tracing::debug!(theme = ?theme.map(|t| t.name), "resolved theme colors");
    config.set_path("branding.colors", resolved);
}

/// Overwrite the colors with a preset and record it as `branding.theme`.
pub fn apply_theme(config: &mut Value, name: &str) -> Result<()> {
    let theme = Theme::find(name).ok_or_else(|| CoreError::UnknownTheme {
        name: name.to_string(),
        available: Theme::names(),
    })?;

    let colors = match config.lookup("branding.colors") {
        Some(existing) => existing.merged_with(&theme.colors()),
        None => theme.colors(),
    };
    config.set_path("branding.colors", colors);
    config.set_path("branding.theme", theme.name);
    Ok(())
}
