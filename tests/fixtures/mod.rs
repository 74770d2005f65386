//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tradeforge::config::{Config, PathConfig};
use tradeforge::models::Blueprint;

/// Creates a config whose data directory is a fresh temp dir.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn temp_config() -> (Config, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        paths: PathConfig::at(temp_dir.path()),
        ..Config::default()
    };
    (config, temp_dir)
}

/// A structured analysis reply for a pool cleaning business.
pub fn pool_cleaner_analysis() -> Value {
    json!({
        "trade": "Pool Cleaner",
        "brand_name_guess": "Crystal Pools",
        "tone": "friendly",
        "target_audience": "homeowners",
        "positioning": "premium",
        "layout": {"hero_layout": "split"},
        "color_palette": {
            "primary": "#0EA5E9",
            "secondary": "#0F172A",
            "accent": "#F59E0B",
            "background": "#FFFFFF"
        },
        "typography": {"heading_style": "bold sans"},
        "cta": {
            "style": "pill",
            "primary_text_examples": ["Book a Clean"],
            "urgency_level": "medium"
        },
        "imagery": {"image_tags": ["pool", "water"]},
        "hero_patterns": ["Sparkling {trade} Service"],
        "pain_points": ["Green water", "Clogged filters"],
        "services": [
            {"name": "Weekly Cleaning", "description": "Skimming and vacuuming", "icon": "droplet"},
            {"name": "Filter Repair", "description": "Fast fixes", "icon": "wrench"}
        ]
    })
}

/// An analysis with a dark background and an overlay hero.
pub fn dark_analysis(trade: &str) -> Value {
    json!({
        "trade": trade,
        "hero_style": "full overlay",
        "color_palette": ["#111827", "#22C55E", "#22C55E", "#0B0B0B"],
        "typography": "heavy condensed",
        "cta": {"urgency_level": "high"}
    })
}

/// Writes a JSON value to `dir/name`, creating `dir`.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create dir");
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).expect("Failed to write file");
    path
}

/// A blueprint with an explicit home section list.
pub fn blueprint_with_sections(sections: &[&str]) -> Blueprint {
    serde_json::from_value(json!({
        "id": "test_A",
        "name": "Test Blueprint",
        "strategy": "Trust",
        "hero_type": "split",
        "cta_strategy": "quote",
        "pages": {"home": sections},
        "content_rules": {"tone": "calm", "cta_text": "Call Today"}
    }))
    .expect("valid blueprint")
}
