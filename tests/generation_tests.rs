//! Integration tests for brand generation against a real data directory.

use std::fs;

use tradeforge::config::PathConfig;
use tradeforge::registry::StyleRegistry;
use tradeforge::render::{Theme, Viewport};
use tradeforge::services::{BrandGenerator, CatalogService, ServiceError};

mod fixtures;
use fixtures::{dark_analysis, pool_cleaner_analysis};

fn open(dir: &std::path::Path) -> (CatalogService, BrandGenerator, StyleRegistry) {
    let catalog = CatalogService::open(PathConfig::at(dir)).unwrap();
    let registry = StyleRegistry::load(Some(&catalog.paths().styles_dir())).unwrap();
    (catalog.clone(), BrandGenerator::new(catalog), registry)
}

#[test]
fn test_generated_trade_survives_restart() {
    let temp = tempfile::TempDir::new().unwrap();
    {
        let (_, generator, registry) = open(temp.path());
        let outcome = generator.generate(&registry, &pool_cleaner_analysis()).unwrap();
        assert!(outcome.created);
    }

    // A fresh catalog and registry over the same directory see everything
    let (catalog, _, registry) = open(temp.path());
    assert!(registry.contains("pool-cleaner"));
    assert_eq!(
        registry.resolve("pool-cleaner").color_palette.primary.to_hex(),
        "#0EA5E9"
    );

    let detail = catalog.get("pool-cleaner").unwrap().unwrap();
    assert_eq!(detail.row.trade.icon, "star");
    assert!(detail.row.profile_hash.is_some());
    assert!(detail.trade_identity.is_some());
    assert_eq!(detail.blueprints.len(), 3);

    let page = catalog
        .render_page(&registry, "pool-cleaner", Theme::Bold, Viewport::Desktop)
        .unwrap()
        .unwrap();
    assert!(page.to_html().contains("Book a Clean"));
}

#[test]
fn test_generated_files_are_named_by_slug() {
    let temp = tempfile::TempDir::new().unwrap();
    let (_, generator, registry) = open(temp.path());
    generator.generate(&registry, &pool_cleaner_analysis()).unwrap();

    let root = temp.path();
    for path in [
        "styles/pool-cleaner.json",
        "trades/pool-cleaner.json",
        "blueprints/pool-cleaner_A.json",
        "blueprints/pool-cleaner_B.json",
        "blueprints/pool-cleaner_C.json",
    ] {
        assert!(root.join(path).is_file(), "missing {path}");
    }

    // No staging leftovers
    for dir in ["styles", "trades", "blueprints"] {
        for entry in fs::read_dir(root.join(dir)).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".staged"), "{name}");
        }
    }
}

#[test]
fn test_dark_profile_extends_overlay_base() {
    let temp = tempfile::TempDir::new().unwrap();
    let (_, generator, registry) = open(temp.path());

    let outcome = generator
        .generate(&registry, &dark_analysis("Night Plumber"))
        .unwrap();

    assert_eq!(outcome.slug, "night-plumber");
    assert_eq!(outcome.style.color_palette.text.to_hex(), "#F8FAFC");
    assert_eq!(
        outcome.style.typography,
        registry.resolve("electrician").typography
    );

    let bold = outcome.blueprints.bold.as_ref().unwrap();
    assert_eq!(bold.content_rules.urgency_level.as_deref(), Some("high"));
}

#[test]
fn test_regenerating_same_profile_is_a_no_op() {
    let temp = tempfile::TempDir::new().unwrap();
    let (catalog, generator, registry) = open(temp.path());

    let first = generator.generate(&registry, &pool_cleaner_analysis()).unwrap();
    let count = catalog.store().count().unwrap();
    let second = generator.generate(&registry, &pool_cleaner_analysis()).unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.blueprints, second.blueprints);
    assert_eq!(catalog.store().count().unwrap(), count);
}

#[test]
fn test_changed_profile_for_same_trade_conflicts() {
    let temp = tempfile::TempDir::new().unwrap();
    let (_, generator, registry) = open(temp.path());
    generator.generate(&registry, &pool_cleaner_analysis()).unwrap();

    let mut changed = pool_cleaner_analysis();
    changed["tone"] = serde_json::json!("serious");

    assert!(matches!(
        generator.generate(&registry, &changed),
        Err(ServiceError::Conflict(slug)) if slug == "pool-cleaner"
    ));
}

#[test]
fn test_failed_generation_leaves_nothing_behind() {
    let temp = tempfile::TempDir::new().unwrap();
    let (catalog, generator, registry) = open(temp.path());
    let before = catalog.store().count().unwrap();

    // A directory where the identity file should go makes the final rename fail
    fs::create_dir_all(temp.path().join("trades/pool-cleaner.json")).unwrap();

    assert!(matches!(
        generator.generate(&registry, &pool_cleaner_analysis()),
        Err(ServiceError::Internal(_))
    ));
    assert_eq!(catalog.store().count().unwrap(), before);
    assert!(catalog.store().get("pool-cleaner").unwrap().is_none());
    assert!(!temp.path().join("styles/pool-cleaner.json").exists());
    assert!(!temp.path().join("blueprints/pool-cleaner_A.json").exists());
}
