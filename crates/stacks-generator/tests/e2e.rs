//! End-to-end tests for stacks.
//!
//! These tests lay out a small library project on disk and run the full
//! build over it.

use std::{fs, path::Path};

use stacks_core::{Settings, SiteConfig};
use stacks_generator::Builder;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

fn sample_project() -> TempDir {
    let root = TempDir::new().expect("temp dir");
    let p = root.path();

    write(
        p,
        "library-config/branding.yaml",
        r##"library:
  name: "Northwind Stacks"
  tagline: "Papers and notes"
  author: "Grace Hopper"
  website: "https://northwind.example"
theme: purple-creative
colors:
  accent: "#000000"
logo:
  enabled: true
  path: /images/logo.svg
  width: 64
"##,
    );
    write(
        p,
        "library-config/deployment.yaml",
        "domain: northwind.example\ncontact_email: desk@northwind.example\njurisdiction: Ontario\n",
    );
    write(
        p,
        "library-config/library-structure.md",
        r#"# Library Structure

## Content Categories

- [Papers](papers)
  - [Compilers](papers/compilers.md)
  - [Ghost](papers/ghost.md)

- [Notes](notes)
  - [Cobol](notes/cobol.md)

---

## How to Customize

- [Ignored](ignored)
"#,
    );
    write(
        p,
        "library-config/pages/privacy.md",
        "# Privacy at [Your Library Name]\n\nQuestions: [your.email@example.com](mailto:your.email@example.com)\n\nLast updated: [Month] [Day], [Year]\n",
    );
    write(p, "library-config/pages/about.md", "---\ntitle: About the Stacks\n---\nRun by [Your Name].\n");
    write(p, "library-config/assets/logo.svg", "<svg/>");
    write(p, "library-config/assets/README.md", "Put your logo here");

    write(
        p,
        "content/papers/compilers.md",
        "---\ntitle: A-0 System\ntype: paper\nsummary: The first compiler\n---\nBody\n",
    );
    write(p, "content/notes/cobol.md", "+++\ntitle = \"COBOL\"\n+++\nNotes\n");
    write(p, "public/pdfs/notes/cobol.pdf", "%PDF-1.4");

    write(
        p,
        "src/layouts/Layout.astro",
        r#"---
import '../styles/global.css';
---
<title>{{ branding.library.name }}</title>
{{#if branding.logo.enabled}}<img src="{{branding.logo.path}}" alt="[Your Library Name]"/>{{/if}}
"#,
    );
    write(
        p,
        "src/components/Nav.astro",
        "<ul>{{#each structure.categories}}<li><a href=\"/{{slug}}\">{{name}}</a></li>{{/each}}</ul>",
    );
    write(p, "src/components/Static.astro", "<footer>plain</footer>");

    root
}

#[test]
fn test_full_build() {
    let project = sample_project();
    let root = project.path();

    let settings = Settings::load(root, None).expect("settings");
    let config = SiteConfig::load(&settings.config_dir()).expect("config loads");
    config.validate().expect("config is valid");

    let stats = Builder::new(settings, config).build().expect("build");

    assert_eq!(stats.categories, 2);
    assert_eq!(stats.indexed_items, 2);
    assert_eq!(stats.pages, 2);
    assert_eq!(stats.assets, 1);
    assert_eq!(stats.processed_files, 2);

    // content index
    let index: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(root.join("src/data/library_content.json")).expect("index"),
    )
    .expect("json");
    let papers = index["papers"].as_array().expect("papers");
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0]["title"], "A-0 System");
    assert_eq!(papers[0]["type"], "paper");
    assert_eq!(papers[0]["author"], "Grace Hopper");
    assert!(papers[0]["pdfUrl"].is_null());
    assert_eq!(index["notes"][0]["pdfUrl"], "/pdfs/notes/cobol.pdf");
    assert_eq!(index["notes"][0]["summary"], "Cobol - part of Notes");
    assert!(index.get("ignored").is_none());

    // CSS: theme colors with the custom accent on top
    let css = fs::read_to_string(root.join("src/styles/config-generated.css")).expect("css");
    assert!(css.contains("--primary-color: #7c3aed;"));
    assert!(css.contains("--accent-color: #000000;"));
    assert!(css.contains("--logo-width: 64px;"));

    // pages
    let privacy = fs::read_to_string(root.join("src/pages/privacy-policy.html")).expect("privacy");
    assert!(privacy.starts_with("<!-- Generated from library-config/pages/privacy.md -->"));
    assert!(privacy.contains("Privacy at Northwind Stacks"));
    assert!(privacy.contains("mailto:desk@northwind.example"));
    assert!(!privacy.contains("[Month]"));
    let about = fs::read_to_string(root.join("src/pages/about.html")).expect("about");
    assert!(about.contains("<title>About the Stacks | Northwind Stacks</title>"));
    assert!(about.contains("Run by Grace Hopper."));

    // assets
    assert!(root.join("public/images/logo.svg").exists());
    assert!(!root.join("public/images/README.md").exists());

    // processed sources
    let layout = fs::read_to_string(root.join("src/layouts/Layout.astro")).expect("layout");
    assert!(layout.contains("import '../styles/config-generated.css';"));
    assert!(layout.contains("<title>Northwind Stacks</title>"));
    assert!(layout.contains("<img src=\"/images/logo.svg\" alt=\"Northwind Stacks\"/>"));
    let nav = fs::read_to_string(root.join("src/components/Nav.astro")).expect("nav");
    assert_eq!(
        nav,
        "<ul><li><a href=\"/papers\">Papers</a></li><li><a href=\"/notes\">Notes</a></li></ul>"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/components/Static.astro")).expect("static"),
        "<footer>plain</footer>"
    );
}

#[test]
fn test_rebuild_is_stable() {
    let project = sample_project();
    let root = project.path();

    let build = || {
        let settings = Settings::load(root, None).expect("settings");
        let config = SiteConfig::load(&settings.config_dir()).expect("config");
        Builder::new(settings, config).build().expect("build")
    };

    build();
    let index_before = fs::read_to_string(root.join("src/data/library_content.json")).unwrap();
    let second = build();

    assert_eq!(second.processed_files, 0);
    assert_eq!(
        fs::read_to_string(root.join("src/data/library_content.json")).unwrap(),
        index_before
    );
}

#[test]
fn test_settings_file_relocates_directories() {
    let project = sample_project();
    let root = project.path();
    fs::rename(root.join("library-config"), root.join("config")).unwrap();
    fs::write(root.join("stacks.toml"), "config_dir = \"config\"\n").unwrap();

    let settings = Settings::load(root, None).expect("settings");
    let config = SiteConfig::load(&settings.config_dir()).expect("config");
    let stats = Builder::new(settings, config).build().expect("build");

    assert_eq!(stats.pages, 2);
    let privacy = fs::read_to_string(root.join("src/pages/privacy-policy.html")).unwrap();
    assert!(privacy.starts_with("<!-- Generated from config/pages/privacy.md -->"));
}

#[test]
fn test_invalid_config_reports_violations() {
    let project = sample_project();
    let root = project.path();
    write(
        root,
        "library-config/branding.yaml",
        "library:\n  name: ''\ntheme: neon\n",
    );

    let config = SiteConfig::load(&root.join("library-config")).expect("loads");
    let err = config.validate().unwrap_err().to_string();

    assert!(err.starts_with("Configuration validation failed:"));
    assert!(err.contains("branding.library.name is required"));
    assert!(err.contains("branding.library.author is required"));
    assert!(err.contains("branding.theme must be one of"));
}
