//! Static site export.
//!
//! Bundles the three rendered themes of a trade (desktop viewport) with its
//! style record, content and a manifest into one zip archive.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::catalog::{render_detail, TradeDetail};
use crate::registry::StyleRegistry;
use crate::render::{Theme, Viewport};

/// Manifest describing an exported bundle.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    slug: &'a str,
    name: &'a str,
    generated_at: String,
    version: &'static str,
    themes: Vec<ManifestTheme>,
}

#[derive(Debug, Serialize)]
struct ManifestTheme {
    id: &'static str,
    letter: char,
    name: &'static str,
    file: String,
}

/// File name of a theme page inside the archive.
fn page_file(theme: Theme) -> String {
    format!("{}.html", theme.id())
}

/// Builds the export archive for `detail` in memory.
///
/// # Errors
///
/// Returns an error if serialization or zip writing fails.
pub fn export_site(registry: &StyleRegistry, detail: &TradeDetail) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let trade = &detail.row.trade;
    for theme in Theme::ALL {
        let page = render_detail(registry, detail, theme, Viewport::Desktop);
        add_file_to_zip(&mut zip, &page_file(theme), page.to_html().as_bytes(), options)?;
    }

    let style = serde_json::to_string_pretty(registry.resolve(&trade.slug))
        .context("Failed to serialize style")?;
    add_file_to_zip(&mut zip, "style.json", style.as_bytes(), options)?;

    let content =
        serde_json::to_string_pretty(&detail.content).context("Failed to serialize content")?;
    add_file_to_zip(&mut zip, "content.json", content.as_bytes(), options)?;

    let manifest = Manifest {
        slug: &trade.slug,
        name: &trade.name,
        generated_at: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        themes: Theme::ALL
            .iter()
            .map(|t| ManifestTheme {
                id: t.id(),
                letter: t.letter(),
                name: t.name(),
                file: page_file(*t),
            })
            .collect(),
    };
    let manifest = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
    add_file_to_zip(&mut zip, "manifest.json", manifest.as_bytes(), options)?;

    let cursor = zip.finish().context("Failed to finalize zip")?;
    Ok(cursor.into_inner())
}

/// Adds a file to a zip archive, rejecting path traversal names.
fn add_file_to_zip<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    content: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    if name.contains("..") || name.starts_with('/') || name.starts_with('\\') {
        bail!("Invalid filename in zip: {name}");
    }

    zip.start_file(name, options)
        .with_context(|| format!("Failed to start file {name}"))?;
    zip.write_all(content)
        .with_context(|| format!("Failed to write file {name}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathConfig;
    use crate::services::CatalogService;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn test_export_contains_all_files() {
        let temp = TempDir::new().unwrap();
        let catalog = CatalogService::open(PathConfig::at(temp.path())).unwrap();
        let registry = StyleRegistry::load_defaults().unwrap();
        let detail = catalog.get("electrician").unwrap().unwrap();

        let bytes = export_site(&registry, &detail).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            [
                "bold.html",
                "clean.html",
                "content.json",
                "luxury.html",
                "manifest.json",
                "style.json"
            ]
        );

        let mut manifest = String::new();
        archive
            .by_name("manifest.json")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest["slug"], "electrician");
        assert_eq!(manifest["themes"][2]["letter"], "C");
        assert_eq!(manifest["themes"][0]["file"], "clean.html");

        let mut html = String::new();
        archive
            .by_name("luxury.html")
            .unwrap()
            .read_to_string(&mut html)
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_rejects_traversal_names() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        assert!(add_file_to_zip(&mut zip, "../evil.html", b"x", options).is_err());
        assert!(add_file_to_zip(&mut zip, "/etc/passwd", b"x", options).is_err());
    }
}
