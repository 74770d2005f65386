//! Blueprint loading with default-category fallback.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::assets;
use crate::models::Blueprint;
use crate::registry::DEFAULT_SLUG;
use crate::render::Theme;

/// Up to three blueprints of one trade, keyed by theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlueprintSet {
    /// Blueprint A
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<Blueprint>,
    /// Blueprint B
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<Blueprint>,
    /// Blueprint C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub luxury: Option<Blueprint>,
}

impl BlueprintSet {
    /// Blueprint for `theme`.
    pub fn get(&self, theme: Theme) -> Option<&Blueprint> {
        match theme {
            Theme::Clean => self.clean.as_ref(),
            Theme::Bold => self.bold.as_ref(),
            Theme::Luxury => self.luxury.as_ref(),
        }
    }

    /// Stores the blueprint of `theme`.
    pub fn set(&mut self, theme: Theme, blueprint: Blueprint) {
        *self.slot(theme) = Some(blueprint);
    }

    fn slot(&mut self, theme: Theme) -> &mut Option<Blueprint> {
        match theme {
            Theme::Clean => &mut self.clean,
            Theme::Bold => &mut self.bold,
            Theme::Luxury => &mut self.luxury,
        }
    }

    /// Returns true when no blueprint is present.
    pub fn is_empty(&self) -> bool {
        self.clean.is_none() && self.bold.is_none() && self.luxury.is_none()
    }

    /// Number of blueprints present.
    pub fn len(&self) -> usize {
        Theme::ALL.iter().filter(|t| self.get(**t).is_some()).count()
    }
}

/// Reads `{dir}/{slug}_{letter}.json` files.
#[derive(Debug, Clone)]
pub struct BlueprintLoader {
    dir: PathBuf,
}

impl BlueprintLoader {
    /// Creates a loader for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path of one blueprint.
    pub fn path_for(&self, slug: &str, theme: Theme) -> PathBuf {
        self.dir.join(file_name(slug, theme))
    }

    /// Loads the blueprints of `slug`.
    ///
    /// When the trade has none, the default category's set is used: files
    /// in the blueprint directory first, then the embedded copies. Malformed
    /// files are logged and skipped.
    pub fn load(&self, slug: &str) -> BlueprintSet {
        if slug != DEFAULT_SLUG {
            let set = self.load_exact(slug);
            if !set.is_empty() {
                return set;
            }
            debug!(slug, "No blueprints for trade, using default set");
        }
        self.load_default()
    }

    /// Loads only the files of `slug`, without fallback.
    pub fn load_exact(&self, slug: &str) -> BlueprintSet {
        let mut set = BlueprintSet::default();
        for theme in Theme::ALL {
            let path = self.path_for(slug, theme);
            if !path.exists() {
                continue;
            }
            match read_blueprint(&path) {
                Ok(blueprint) => *set.slot(theme) = Some(blueprint),
                Err(e) => warn!(path = %path.display(), error = %format!("{e:#}"), "Skipping blueprint"),
            }
        }
        set
    }

    fn load_default(&self) -> BlueprintSet {
        let mut set = self.load_exact(DEFAULT_SLUG);
        for theme in Theme::ALL {
            if set.get(theme).is_some() {
                continue;
            }
            match embedded(theme) {
                Ok(blueprint) => *set.slot(theme) = Some(blueprint),
                Err(e) => warn!(theme = %theme, error = %format!("{e:#}"), "Embedded blueprint unavailable"),
            }
        }
        set
    }
}

/// `{slug}_{letter}.json`
pub fn file_name(slug: &str, theme: Theme) -> String {
    format!("{slug}_{}.json", theme.letter())
}

fn read_blueprint(path: &Path) -> Result<Blueprint> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read blueprint {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse blueprint {}", path.display()))
}

fn embedded(theme: Theme) -> Result<Blueprint> {
    let path = format!("blueprints/{}", file_name(DEFAULT_SLUG, theme));
    let text = assets::text(&path)?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse embedded {path}"))
}
