//! Template substitution engine.
//!
//! Templates are plain text carrying three kinds of directives, resolved
//! against a configuration [`Value`] tree:
//!
//! - `{{ branding.library.name }}` substitutes the value at a dotted path.
//! - `{{#if path}}...{{/if}}` keeps its body only when the path is truthy.
//! - `{{#each path}}...{{/each}}` repeats its body once per sequence element,
//!   with `this` bound to the element and a mapping element's keys in scope.
//!
//! Older templates also use bracket placeholders such as `[Your Library Name]`,
//! which are replaced before any directive is looked at.
//!
//! The engine never fails. Unknown paths leave `{{ ... }}` untouched and
//! unmatched block delimiters stay as literal text.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};
use stacks_core::{Mapping, Value};

static IF_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#if\s+([^\s{}]+)\s*\}\}(.*?)\{\{/if\}\}").expect("valid regex")
});

static EACH_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#each\s+([^\s{}]+)\s*\}\}(.*?)\{\{/each\}\}").expect("valid regex")
});

static SUBSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([^\s{}#/][^\s{}]*)\s*\}\}").expect("valid regex")
});

/// Bracket placeholders and the paths tried for each, in order.
pub const BRACKET_PLACEHOLDERS: &[(&str, &[&str])] = &[
    ("[Your Library Name]", &["branding.library.name"]),
    (
        "[Your Name/Organization]",
        &["branding.library.organization", "branding.library.author"],
    ),
    ("[Your Name]", &["branding.library.author"]),
    ("[Your Organization]", &["branding.library.organization"]),
    ("[Your Website]", &["branding.library.website"]),
    ("[Your Jurisdiction]", &["deployment.jurisdiction"]),
];

/// Process every directive in `template` against `context`.
#[must_use]
pub fn process(template: &str, context: &Value) -> String {
    let text = replace_placeholders(template, context);
    let text = process_conditionals(&text, context);
    let text = process_loops(&text, context);
    substitute(&text, context).into_owned()
}

/// Replace bracket placeholders whose first truthy path resolves.
///
/// A placeholder with no truthy path stays as written.
#[must_use]
pub fn replace_placeholders(text: &str, context: &Value) -> String {
    let mut out = text.to_string();
    for (literal, paths) in BRACKET_PLACEHOLDERS {
        if !out.contains(literal) {
            continue;
        }
        let replacement = paths
            .iter()
            .filter_map(|path| context.lookup(path))
            .find(|value| value.is_truthy());
        if let Some(value) = replacement {
            out = out.replace(literal, &value.to_string());
        }
    }
    out
}

/// Block bodies are processed before the enclosing text is substituted, so a
/// value that itself contains a directive is expanded once more inside a block.
fn process_conditionals(text: &str, context: &Value) -> String {
    IF_BLOCK
        .replace_all(text, |caps: &Captures| {
            let truthy = context.lookup(&caps[1]).is_some_and(Value::is_truthy);
            if truthy {
                process(&caps[2], context)
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn process_loops(text: &str, context: &Value) -> String {
    EACH_BLOCK
        .replace_all(text, |caps: &Captures| {
            let Some(items) = context.lookup(&caps[1]).and_then(Value::as_sequence) else {
                return String::new();
            };
            let body = &caps[2];

            items
                .iter()
                .map(|item| process(body, &loop_scope(context, item)))
                .collect::<String>()
        })
        .into_owned()
}

/// The outer context overlaid with `this` and, for mappings, the item's keys.
fn loop_scope(context: &Value, item: &Value) -> Value {
    let mut scope: Mapping = context.as_mapping().cloned().unwrap_or_default();
    scope.insert("this".to_string(), item.clone());
    if let Some(fields) = item.as_mapping() {
        for (key, value) in fields {
            scope.insert(key.clone(), value.clone());
        }
    }
    Value::Mapping(scope)
}

fn substitute<'t>(text: &'t str, context: &Value) -> Cow<'t, str> {
    SUBSTITUTION.replace_all(text, |caps: &Captures| match context.lookup(&caps[1]) {
        Some(value) if !value.is_null() => value.to_string(),
        _ => caps[0].to_string(),
    })
}

/// A named template, rendered with [`process`].
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Render the template against `context`.
    #[must_use]
    pub fn render(&self, context: &Value) -> String {
        tracing::trace!(template = %self.name, "rendering template");
        process(&self.content, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).expect("valid yaml")
    }

    fn acme() -> Value {
        yaml(
            r##"
branding:
  library:
    name: Acme
    author: Ada Lovelace
    tagline: ""
  logo:
    enabled: false
    width: 48
  colors:
    primary: "#2563eb"
deployment:
  jurisdiction: Scotland
"##,
        )
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "<div class=\"card\">{ not a directive } [Not a placeholder]</div>";
        assert_eq!(process(text, &acme()), text);
        assert_eq!(process("", &Value::Null), "");
    }

    #[test]
    fn test_substitutes_paths() {
        assert_eq!(
            process("Welcome to {{branding.library.name}}", &acme()),
            "Welcome to Acme"
        );
        assert_eq!(
            process("{{ branding.colors.primary }} / {{branding.logo.width}}", &acme()),
            "#2563eb / 48"
        );
        assert_eq!(process("{{branding.logo.enabled}}", &acme()), "false");
    }

    #[test]
    fn test_missing_path_left_unchanged() {
        let text = "Hi {{ branding.library.missing }} and {{nope.deeper}}";
        assert_eq!(process(text, &acme()), text);
        // walking through a scalar fails the lookup
        assert_eq!(
            process("{{branding.library.name.first}}", &acme()),
            "{{branding.library.name.first}}"
        );
    }

    #[test]
    fn test_null_is_not_defined() {
        let ctx = yaml("a: ~\n");
        assert_eq!(process("{{a}}", &ctx), "{{a}}");
    }

    #[test]
    fn test_falsy_conditionals_removed() {
        assert_eq!(
            process("{{#if branding.logo.enabled}}<img/>{{/if}}", &Value::mapping()),
            ""
        );
        assert_eq!(
            process("a{{#if branding.logo.enabled}}<img/>{{/if}}b", &acme()),
            "ab"
        );
        assert_eq!(
            process("{{#if branding.library.tagline}}<p/>{{/if}}", &acme()),
            ""
        );
    }

    #[test]
    fn test_truthy_conditional_body_processed() {
        let out = process(
            "{{#if branding.library.name}}<h1>{{branding.library.name}}</h1>{{/if}}",
            &acme(),
        );
        assert_eq!(out, "<h1>Acme</h1>");
    }

    #[test]
    fn test_conditionals_are_non_greedy() {
        let out = process(
            "{{#if branding.library.name}}A{{/if}}-{{#if missing}}B{{/if}}-{{#if branding.library.author}}C{{/if}}",
            &acme(),
        );
        assert_eq!(out, "A--C");
    }

    #[test]
    fn test_conditional_spans_lines() {
        let out = process(
            "{{#if branding.library.name}}\n<p>\n  yes\n</p>\n{{/if}}",
            &acme(),
        );
        assert_eq!(out, "\n<p>\n  yes\n</p>\n");
    }

    #[test]
    fn test_each_over_mappings() {
        let ctx = yaml("items:\n  - title: A\n  - title: B\n");
        assert_eq!(
            process("{{#each items}}<li>{{title}}</li>{{/each}}", &ctx),
            "<li>A</li><li>B</li>"
        );
    }

    #[test]
    fn test_each_binds_this() {
        let ctx = yaml("tags: [rust, yaml, 3]\n");
        assert_eq!(
            process("{{#each tags}}[{{this}}]{{/each}}", &ctx),
            "[rust][yaml][3]"
        );
        assert_eq!(
            process("{{#each tags}}{{this}}{{/each}}", &ctx),
            "rustyaml3"
        );
    }

    #[test]
    fn test_each_keeps_outer_scope() {
        let ctx = yaml("site: Acme\nname: outer\nitems:\n  - name: inner\n");
        assert_eq!(
            process("{{#each items}}{{name}}@{{site}}{{/each}}", &ctx),
            "inner@Acme"
        );
    }

    #[test]
    fn test_each_over_non_sequence_is_empty() {
        let ctx = yaml("items: not-a-list\n");
        assert_eq!(process("x{{#each items}}<li/>{{/each}}y", &ctx), "xy");
        assert_eq!(process("x{{#each missing}}<li/>{{/each}}y", &ctx), "xy");
    }

    #[test]
    fn test_each_empty_sequence() {
        let ctx = yaml("items: []\n");
        assert_eq!(process("{{#each items}}<li/>{{/each}}", &ctx), "");
    }

    #[test]
    fn test_bracket_placeholders() {
        assert_eq!(process("[Your Library Name]", &acme()), "Acme");
        assert_eq!(
            process("[Your Name/Organization] in [Your Jurisdiction]", &acme()),
            "Ada Lovelace in Scotland"
        );
        assert_eq!(
            process("[Your Name] and [Your Name]", &acme()),
            "Ada Lovelace and Ada Lovelace"
        );
    }

    #[test]
    fn test_bracket_placeholder_without_value_kept() {
        assert_eq!(process("[Your Website]", &acme()), "[Your Website]");
        assert_eq!(
            process("[Your Organization]", &Value::mapping()),
            "[Your Organization]"
        );
    }

    #[test]
    fn test_brackets_run_before_directives() {
        let ctx = yaml("branding:\n  library:\n    name: \"{{deployment.domain}}\"\ndeployment:\n  domain: acme.org\n");
        assert_eq!(process("[Your Library Name]", &ctx), "acme.org");
    }

    #[test]
    fn test_unmatched_delimiters_are_literal() {
        let text = "{{#if branding.library.name}}never closed {{ and {{/each}}";
        assert_eq!(process(text, &acme()), text);
    }

    #[test]
    fn test_sequence_and_mapping_string_forms() {
        let ctx = yaml("tags: [a, b]\nmeta:\n  k: 1\n");
        assert_eq!(process("{{tags}}", &ctx), "a,b");
        assert_eq!(process("{{meta}}", &ctx), "{\"k\":1}");
    }

    #[test]
    fn test_named_template() {
        let template = Template::new("greeting", "Hello {{branding.library.author}}");
        assert_eq!(template.render(&acme()), "Hello Ada Lovelace");
    }

    #[test]
    fn test_directive_values_expand_only_inside_blocks() {
        let ctx = yaml("a: \"{{b}}\"\nb: X\n");
        assert_eq!(process("{{a}}", &ctx), "{{b}}");
        assert_eq!(process("{{#if a}}{{a}}{{/if}}", &ctx), "X");
    }
}
