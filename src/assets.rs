//! Embedded default data: style records, fallback blueprints and seed trades.
//!
//! Files are embedded at compile time from the `defaults/` directory so a
//! fresh install works without any data on disk.

use anyhow::{Context, Result};
use rust_embed::Embed;

/// Embedded files from `defaults/`.
#[derive(Embed)]
#[folder = "defaults/"]
pub struct DefaultAssets;

/// Returns the UTF-8 contents of an embedded file.
///
/// # Errors
///
/// Returns an error if the file is missing or not valid UTF-8.
pub fn text(path: &str) -> Result<String> {
    let file = DefaultAssets::get(path)
        .with_context(|| format!("Embedded default '{path}' is missing"))?;
    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("Embedded default '{path}' is not valid UTF-8"))
}

/// Lists embedded file paths under `prefix` (e.g. `"styles/"`), sorted.
pub fn paths_under(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = DefaultAssets::iter()
        .filter(|p| p.starts_with(prefix))
        .map(|p| p.into_owned())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_embedded() {
        assert_eq!(paths_under("styles/").len(), 16);
        assert_eq!(paths_under("blueprints/").len(), 3);
        assert!(text("seed_trades.json").unwrap().contains("plumber"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(text("styles/nope.toml").is_err());
    }
}
