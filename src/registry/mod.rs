//! Brand style registry.
//!
//! Maps a trade slug to its [`BrandStyle`]. Records are declared in TOML
//! (embedded defaults plus an optional styles directory of `*.toml` and
//! `*.json` files). A record may `extends = "<slug>"` another record and
//! override only the fields it names.
//!
//! Once loaded the registry never changes. [`StyleRegistry::with_record`]
//! returns a new registry that shares every untouched record.

mod merge;

pub use merge::deep_merge;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::assets;
use crate::models::BrandStyle;

/// Slug of the record every unknown slug resolves to.
pub const DEFAULT_SLUG: &str = "plumber";

/// Key naming the parent record of a style document.
const EXTENDS_KEY: &str = "extends";

/// An unresolved style document.
#[derive(Debug, Clone)]
struct RawStyle {
    /// Where the document came from (for error messages)
    source: String,
    /// Document body, possibly with an `extends` key
    body: Value,
}

/// Immutable slug → style map with a guaranteed fallback record.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    records: BTreeMap<String, Arc<BrandStyle>>,
    fallback: Arc<BrandStyle>,
}

impl StyleRegistry {
    /// Loads the embedded default records.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded record is malformed.
    pub fn load_defaults() -> Result<Self> {
        Self::load(None)
    }

    /// Loads the embedded defaults, then the records in `styles_dir`.
    ///
    /// On-disk records add new slugs or replace embedded ones. A missing
    /// directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if any record cannot be parsed, extends an unknown
    /// slug, forms an `extends` cycle, carries an invalid color, or leaves a
    /// required field empty.
    pub fn load(styles_dir: Option<&Path>) -> Result<Self> {
        let mut raw = embedded_styles()?;

        if let Some(dir) = styles_dir {
            for (slug, style) in styles_in_dir(dir)? {
                if raw.contains_key(&slug) {
                    debug!(slug = %slug, source = %style.source, "Replacing embedded style");
                }
                raw.insert(slug, style);
            }
        }

        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, RawStyle>) -> Result<Self> {
        let mut resolved: HashMap<String, Value> = HashMap::new();
        for slug in raw.keys() {
            let mut chain = Vec::new();
            resolve_document(slug, &raw, &mut resolved, &mut chain)?;
        }

        let mut records = BTreeMap::new();
        for (slug, body) in resolved {
            let source = raw.get(&slug).map_or("<unknown>", |r| r.source.as_str());
            let style: BrandStyle = serde_json::from_value(body)
                .with_context(|| format!("Invalid style record '{slug}' in {source}"))?;

            if style.slug != slug {
                bail!(
                    "Style record in {source} declares slug '{}' but is registered as '{slug}'",
                    style.slug
                );
            }

            let missing = style.missing_fields();
            if !missing.is_empty() {
                bail!(
                    "Style record '{slug}' in {source} has empty fields: {}",
                    missing.join(", ")
                );
            }

            records.insert(slug, Arc::new(style));
        }

        let fallback = records
            .get(DEFAULT_SLUG)
            .cloned()
            .with_context(|| format!("Default style record '{DEFAULT_SLUG}' is missing"))?;

        Ok(Self { records, fallback })
    }

    /// Resolves a slug to its style record.
    ///
    /// Never fails: unknown slugs resolve to the [`DEFAULT_SLUG`] record.
    pub fn resolve(&self, slug: &str) -> &BrandStyle {
        self.records.get(slug).unwrap_or(&self.fallback)
    }

    /// Returns true when `slug` has its own record.
    pub fn contains(&self, slug: &str) -> bool {
        self.records.contains_key(slug)
    }

    /// Registered slugs in sorted order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// All records in slug order.
    pub fn records(&self) -> impl Iterator<Item = &BrandStyle> {
        self.records.values().map(|r| r.as_ref())
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no records are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a new registry with `style` added or replaced.
    ///
    /// `self` is left untouched; records are shared between both values.
    #[must_use]
    pub fn with_record(&self, style: BrandStyle) -> Self {
        let mut records = self.records.clone();
        let style = Arc::new(style);
        let fallback = if style.slug == DEFAULT_SLUG {
            Arc::clone(&style)
        } else {
            Arc::clone(&self.fallback)
        };
        records.insert(style.slug.clone(), style);
        Self { records, fallback }
    }
}

/// Resolves a single style document against an existing registry.
///
/// Applies the document's `extends` parent from `registry`. Used to turn a
/// generated style document into a record without reloading every file.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed, extends an unknown
/// slug, or does not describe a complete record.
pub fn resolve_with(registry: &StyleRegistry, body: Value) -> Result<BrandStyle> {
    let mut body = body;
    let parent = match body.as_object_mut() {
        Some(obj) => obj.remove(EXTENDS_KEY),
        None => bail!("Style document must be a table"),
    };

    let merged = match parent {
        Some(Value::String(parent)) => {
            if !registry.contains(&parent) {
                bail!("Style document extends unknown style '{parent}'");
            }
            let mut base = serde_json::to_value(registry.resolve(&parent))
                .context("Failed to serialize parent style")?;
            deep_merge(&mut base, body);
            base
        }
        Some(_) => bail!("'{EXTENDS_KEY}' must be a string"),
        None => body,
    };

    let style: BrandStyle =
        serde_json::from_value(merged).context("Style document is not a complete record")?;
    let missing = style.missing_fields();
    if !missing.is_empty() {
        bail!("Style '{}' has empty fields: {}", style.slug, missing.join(", "));
    }
    Ok(style)
}

/// Parses a style document from TOML or JSON text.
///
/// # Errors
///
/// Returns an error if the text is not valid for the given format.
pub fn parse_document(text: &str, is_json: bool, source: &str) -> Result<Value> {
    if is_json {
        serde_json::from_str(text).with_context(|| format!("Failed to parse JSON style {source}"))
    } else {
        let table: toml::Table =
            toml::from_str(text).with_context(|| format!("Failed to parse TOML style {source}"))?;
        serde_json::to_value(table).with_context(|| format!("Failed to convert style {source}"))
    }
}

fn resolve_document(
    slug: &str,
    raw: &BTreeMap<String, RawStyle>,
    resolved: &mut HashMap<String, Value>,
    chain: &mut Vec<String>,
) -> Result<Value> {
    if let Some(done) = resolved.get(slug) {
        return Ok(done.clone());
    }

    if chain.iter().any(|s| s == slug) {
        chain.push(slug.to_string());
        bail!("Style inheritance cycle: {}", chain.join(" -> "));
    }

    let Some(style) = raw.get(slug) else {
        let child = chain.last().map_or("<root>", String::as_str);
        bail!("Style '{child}' extends unknown style '{slug}'");
    };

    chain.push(slug.to_string());

    let mut body = style.body.clone();
    let parent = body
        .as_object_mut()
        .and_then(|obj| obj.remove(EXTENDS_KEY));

    let merged = match parent {
        Some(Value::String(parent)) => {
            let mut base = resolve_document(&parent, raw, resolved, chain)?;
            deep_merge(&mut base, body);
            base
        }
        Some(_) => bail!("'{EXTENDS_KEY}' in {} must be a string", style.source),
        None => body,
    };

    chain.pop();
    resolved.insert(slug.to_string(), merged.clone());
    Ok(merged)
}

fn embedded_styles() -> Result<BTreeMap<String, RawStyle>> {
    let mut raw = BTreeMap::new();
    for path in assets::paths_under("styles/") {
        let text = assets::text(&path)?;
        let body = parse_document(&text, path.ends_with(".json"), &path)?;
        let slug = document_slug(&body, &path);
        raw.insert(
            slug,
            RawStyle {
                source: format!("embedded {path}"),
                body,
            },
        );
    }
    Ok(raw)
}

fn styles_in_dir(dir: &Path) -> Result<Vec<(String, RawStyle)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read styles directory {}", dir.display()))?;

    let mut styles = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_json = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => true,
            Some("toml") => false,
            // Left behind by an interrupted generation
            Some("staged") => continue,
            _ => {
                warn!(path = %path.display(), "Skipping non-style file");
                continue;
            }
        };

        let source = path.display().to_string();
        let parsed = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read style {source}"))
            .and_then(|text| parse_document(&text, is_json, &source));
        let body = match parsed {
            Ok(body) => body,
            Err(e) => {
                warn!(path = %source, error = %format!("{e:#}"), "Skipping unreadable style file");
                continue;
            }
        };
        let slug = document_slug(&body, &source);
        styles.push((slug, RawStyle { source, body }));
    }

    styles.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(styles)
}

/// Slug of a document: its `slug` field, else the file stem.
fn document_slug(body: &Value, source: &str) -> String {
    body.get("slug")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            Path::new(source)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_load() {
        let registry = StyleRegistry::load_defaults().unwrap();
        assert_eq!(registry.len(), 16);
        assert!(registry.contains("gas-engineer"));
        assert_eq!(registry.resolve("electrician").slug, "electrician");
    }

    #[test]
    fn test_unknown_slug_falls_back() {
        let registry = StyleRegistry::load_defaults().unwrap();
        assert_eq!(registry.resolve("astronaut"), registry.resolve(DEFAULT_SLUG));
        assert_eq!(registry.resolve(""), registry.resolve(DEFAULT_SLUG));
    }

    #[test]
    fn test_clone_inherits_base_fields() {
        let registry = StyleRegistry::load_defaults().unwrap();
        let base = registry.resolve("plumber");
        let clone = registry.resolve("roofer");
        assert_eq!(clone.typography, base.typography);
        assert_ne!(clone.color_palette.primary, base.color_palette.primary);
        assert_eq!(clone.themes.luxury.brand_name, "Summit & Slate");
        assert_eq!(clone.themes.luxury.heading_font, base.themes.luxury.heading_font);
    }

    #[test]
    fn test_styles_dir_adds_and_replaces() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("surveyor.json"),
            json!({
                "extends": "electrician",
                "slug": "surveyor",
                "name": "Surveyor",
                "color_palette": {"primary": "#123456"}
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            dir.path().join("painter.toml"),
            "extends = \"landscaper\"\nslug = \"painter\"\nname = \"Painter Two\"\n",
        )
        .unwrap();

        let registry = StyleRegistry::load(Some(dir.path())).unwrap();
        assert_eq!(registry.len(), 17);
        assert_eq!(registry.resolve("surveyor").color_palette.primary.to_hex(), "#123456");
        assert_eq!(registry.resolve("painter").name, "Painter Two");
        assert_eq!(
            registry.resolve("painter").typography,
            registry.resolve("landscaper").typography
        );
    }

    #[test]
    fn test_unknown_parent_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("ghost.toml"),
            "extends = \"nobody\"\nslug = \"ghost\"\nname = \"Ghost\"\n",
        )
        .unwrap();
        let err = StyleRegistry::load(Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("unknown style 'nobody'"));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.toml"), "extends = \"b\"\nslug = \"a\"\n").unwrap();
        fs::write(dir.path().join("b.toml"), "extends = \"a\"\nslug = \"b\"\n").unwrap();
        let err = StyleRegistry::load(Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("bad.toml"),
            "extends = \"plumber\"\nslug = \"bad\"\nname = \"Bad\"\n[color_palette]\nprimary = \"#fff\"\n",
        )
        .unwrap();
        assert!(StyleRegistry::load(Some(dir.path())).is_err());
    }

    #[test]
    fn test_with_record_is_copy_on_write() {
        let registry = StyleRegistry::load_defaults().unwrap();
        let mut style = registry.resolve("plumber").clone();
        style.slug = "drain-doctor".to_string();
        style.name = "Drain Doctor".to_string();

        let next = registry.with_record(style);
        assert!(next.contains("drain-doctor"));
        assert!(!registry.contains("drain-doctor"));
        assert_eq!(next.len(), registry.len() + 1);
    }

    #[test]
    fn test_resolve_with_applies_extends() {
        let registry = StyleRegistry::load_defaults().unwrap();
        let style = resolve_with(
            &registry,
            json!({"extends": "painter", "slug": "muralist", "name": "Muralist"}),
        )
        .unwrap();
        assert_eq!(style.slug, "muralist");
        assert_eq!(style.layout, registry.resolve("painter").layout);

        assert!(resolve_with(&registry, json!({"extends": "nobody", "slug": "x"})).is_err());
    }
}
