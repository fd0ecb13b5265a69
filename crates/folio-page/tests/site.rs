//! End-to-end page lifecycle over a configured site.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use folio_config::{AmbientSetting, CliSettings, Config};
use folio_export::{Clock, CopyOutcome, ManualClock, MemoryClipboard};
use folio_page::{DocsContext, Page, PageController, SiteMap};
use folio_prefs::Theme;
use folio_sections::RegionRect;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CONFIG: &str = r#"
[site]
title = "Puffinflow Docs"
origin = "puffin-docs"
content_dir = "docs"

[preferences]
store_dir = "state"
ambient = "light"

[[groups]]
title = "Documentation"

[[groups]]
title = "Recipes"

[[pages]]
key = "docs"
id = "introduction"
label = "Introduction"
group = "Documentation"
sections = [
    { id = "what-is-puffinflow", label = "What is Puffinflow?" },
    { id = "quick-start", label = "Quick Start" },
]

[[pages]]
key = "docs/recipes/retries"
id = "retries"
label = "Retries"
group = "Recipes"
source = "recipes/retries.md"
"#;

const INTRODUCTION: &str = "\
# Introduction

## What is Puffinflow?

A **workflow** engine.

## Quick Start

```python
agent = Agent(\"**not bold**\")
```
";

fn write_site(dir: &Path) -> Config {
    std::fs::create_dir_all(dir.join("docs/recipes")).unwrap();
    std::fs::write(dir.join("docs/introduction.md"), INTRODUCTION).unwrap();
    std::fs::write(dir.join("docs/recipes/retries.md"), "# Retries\n\n## Backoff\n\nWait.").unwrap();
    let path = dir.join("folio.toml");
    std::fs::write(&path, CONFIG).unwrap();
    Config::load(Some(&path), None).unwrap()
}

fn session(config: &Config, clock: &Arc<ManualClock>) -> DocsContext {
    DocsContext::from_config(config, Arc::clone(clock) as Arc<dyn Clock>)
}

#[test]
fn test_route_and_render_document() {
    let tmp = TempDir::new().unwrap();
    let config = write_site(tmp.path());
    let site = SiteMap::from_config(&config);
    let clock = Arc::new(ManualClock::new());
    let mut ctx = session(&config, &clock);

    let route = site.route("#docs#quick-start").unwrap();
    assert_eq!(route.section.as_deref(), Some("quick-start"));

    let page = Page::load(&config, &route.link.key).unwrap();
    let mounted = PageController::mount(&mut ctx, page);
    let html = mounted.render_document(&site);

    assert!(html.contains("<title>Introduction - Puffinflow Docs</title>"));
    assert!(html.contains("<body class=\"docs-view docs-view-light\">"));
    assert!(html.contains("<h2 id=\"quick-start\">Quick Start</h2>"));
    assert!(html.contains("**not bold**"));
    assert!(!html.contains("<strong>not bold</strong>"));
    assert!(html.contains("href=\"#docs#what-is-puffinflow\" class=\"toc-link active\""));
    assert!(html.contains("href=\"#docs/recipes/retries\" class=\"nav-link\""));
}

#[test]
fn test_theme_persists_across_sessions() {
    let tmp = TempDir::new().unwrap();
    let config = write_site(tmp.path());
    let clock = Arc::new(ManualClock::new());

    {
        let mut ctx = session(&config, &clock);
        let mut mounted = PageController::mount(&mut ctx, Page::load(&config, "docs").unwrap());
        assert_eq!(mounted.theme(), Theme::Light);
        assert_eq!(mounted.toggle_theme(), Theme::Dark);
    }

    let stored = std::fs::read_to_string(tmp.path().join("state/puffin-docs.json")).unwrap();
    assert!(stored.contains("\"puffin-docs-theme\": \"dark\""));

    let mut ctx = session(&config, &clock);
    let mounted = PageController::mount(&mut ctx, Page::load(&config, "docs").unwrap());
    assert_eq!(mounted.theme(), Theme::Dark);
    assert_eq!(mounted.view().toggle_label, "Switch to light");
}

#[test]
fn test_navigation_keeps_theme_and_resets_page_state() {
    let tmp = TempDir::new().unwrap();
    let config = write_site(tmp.path());
    let clock = Arc::new(ManualClock::new());
    let mut ctx = session(&config, &clock);

    {
        let mut intro = PageController::mount(&mut ctx, Page::load(&config, "docs").unwrap());
        intro.observe(
            &[
                RegionRect::new("what-is-puffinflow", -400.0, -10.0),
                RegionRect::new("quick-start", 120.0, 600.0),
            ],
            900.0,
        );
        assert_eq!(intro.active_section(), Some("quick-start"));
        intro.toggle_theme();
    }
    assert_eq!(ctx.root.class_attr(), "");

    let retries = PageController::mount(&mut ctx, Page::load(&config, "docs/recipes/retries").unwrap());
    assert_eq!(retries.theme(), Theme::Dark);
    assert_eq!(retries.active_section(), Some("backoff"));
}

#[tokio::test]
async fn test_copy_confirmation_window() {
    let tmp = TempDir::new().unwrap();
    let config = write_site(tmp.path());
    let clock = Arc::new(ManualClock::new());
    let mut ctx = session(&config, &clock);
    let clipboard = MemoryClipboard::new();
    let mut mounted = PageController::mount(&mut ctx, Page::load(&config, "docs").unwrap());

    assert_eq!(mounted.copy_source(&clipboard).await, CopyOutcome::Copied);
    assert_eq!(clipboard.contents().as_deref(), Some(INTRODUCTION));

    clock.advance(Duration::from_millis(1000));
    mounted.copy_source(&clipboard).await;
    clock.advance(Duration::from_millis(1999));
    assert!(mounted.view().copy_confirmed);

    clock.advance(Duration::from_millis(1));
    assert!(!mounted.view().copy_confirmed);
    assert_eq!(mounted.view().copy_label, "Copy as Markdown");
}

#[test]
fn test_demo_site_sections_match_headings() {
    let tmp = TempDir::new().unwrap();
    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/site/folio.toml");
    let settings = CliSettings {
        store_dir: Some(tmp.path().to_path_buf()),
        ambient: Some(AmbientSetting::Disabled),
        ..CliSettings::default()
    };
    let config = Config::load(Some(&config_path), Some(&settings)).unwrap();
    let site = SiteMap::from_config(&config);
    let clock = Arc::new(ManualClock::new());
    let mut ctx = session(&config, &clock);

    assert_eq!(site.links().count(), config.pages.len());
    for link in site.links() {
        let mounted = PageController::mount(&mut ctx, Page::load(&config, &link.key).unwrap());
        assert!(!mounted.sections().is_empty(), "{} has no sections", link.key);
        for section in mounted.sections() {
            assert!(
                mounted.toc().iter().any(|entry| entry.id == section.id),
                "{} has no heading for {}",
                link.key,
                section.id
            );
        }
    }
}
