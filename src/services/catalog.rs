//! Trade catalog service.
//!
//! Coordinates the trade store, identity files and blueprint files into the
//! views the API and CLI need. Content precedence is identity record first,
//! then stored content, then the synthesized default.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::blueprints::{BlueprintLoader, BlueprintSet};
use super::ServiceError;
use crate::config::PathConfig;
use crate::models::{ContentRecord, NewTrade, Trade, TradeIdentity};
use crate::registry::StyleRegistry;
use crate::render::{self, Page, RenderInput, Theme, Viewport};
use crate::store::{TradeRow, TradeStore};

/// A trade with everything needed to render it.
#[derive(Debug, Clone, Serialize)]
pub struct TradeDetail {
    /// Catalog row
    #[serde(flatten)]
    pub row: TradeRow,
    /// Resolved content
    pub content: ContentRecord,
    /// Blueprints keyed by theme name
    pub blueprints: BlueprintSet,
    /// Identity record, for generated trades
    #[serde(rename = "tradeIdentity", skip_serializing_if = "Option::is_none")]
    pub trade_identity: Option<TradeIdentity>,
}

/// Service for reading and creating trades.
#[derive(Clone)]
pub struct CatalogService {
    store: TradeStore,
    paths: PathConfig,
    blueprints: BlueprintLoader,
}

impl CatalogService {
    /// Creates a catalog over `store` with files under `paths`.
    pub fn new(store: TradeStore, paths: PathConfig) -> Self {
        let blueprints = BlueprintLoader::new(paths.blueprints_dir());
        Self {
            store,
            paths,
            blueprints,
        }
    }

    /// Opens the store in the data directory, seeding it on first start.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// database cannot be opened or seeded.
    pub fn open(paths: PathConfig) -> Result<Self> {
        paths.ensure_dirs()?;
        let db_path = paths.db_path();
        let store = TradeStore::open(&db_path)
            .with_context(|| format!("Failed to open trade store at {}", db_path.display()))?;
        let seeded = store.seed_defaults().context("Failed to seed default trades")?;
        if seeded > 0 {
            info!(count = seeded, "Initialized trade catalog");
        }
        Ok(Self::new(store, paths))
    }

    /// Underlying store.
    pub fn store(&self) -> &TradeStore {
        &self.store
    }

    /// Data directory layout.
    pub fn paths(&self) -> &PathConfig {
        &self.paths
    }

    /// Blueprint loader for the data directory.
    pub fn blueprint_loader(&self) -> &BlueprintLoader {
        &self.blueprints
    }

    /// All trades in insertion order.
    pub fn list(&self) -> Result<Vec<Trade>> {
        self.store.list().context("Failed to list trades")
    }

    /// Looks up a trade and resolves its content, blueprints and identity.
    pub fn get(&self, slug: &str) -> Result<Option<TradeDetail>> {
        let Some(row) = self
            .store
            .get(slug)
            .with_context(|| format!("Failed to read trade '{slug}'"))?
        else {
            return Ok(None);
        };

        let trade_identity = self.load_identity(slug);
        let content = match &trade_identity {
            Some(identity) => ContentRecord::from_identity(identity),
            None => self
                .store
                .content(slug)
                .with_context(|| format!("Failed to read content of '{slug}'"))?
                .unwrap_or_else(|| {
                    debug!(slug, "No stored content, synthesizing");
                    ContentRecord::synthesize(&row.trade.slug, &row.trade.name)
                }),
        };

        Ok(Some(TradeDetail {
            blueprints: self.blueprints.load(slug),
            row,
            content,
            trade_identity,
        }))
    }

    /// Validates and inserts a new trade with synthesized default content.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Invalid`] for bad input, [`ServiceError::Conflict`]
    /// when the slug is taken.
    pub fn create(&self, new: NewTrade) -> Result<TradeRow, ServiceError> {
        let trade = new.validate()?;
        let content = ContentRecord::synthesize(&trade.slug, &trade.name);
        let row = self.store.insert(&trade, &content)?;
        info!(slug = %row.trade.slug, "Created trade");
        Ok(row)
    }

    /// Path of the identity record of `slug`.
    pub fn identity_path(&self, slug: &str) -> PathBuf {
        self.paths.trades_dir().join(format!("{slug}.json"))
    }

    /// Reads `trades/{slug}.json`. Missing or malformed files yield `None`.
    pub fn load_identity(&self, slug: &str) -> Option<TradeIdentity> {
        let path = self.identity_path(slug);
        let text = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring malformed identity record");
                None
            }
        }
    }

    /// Renders one theme of a trade, or `None` when the trade is unknown.
    pub fn render_page(
        &self,
        registry: &StyleRegistry,
        slug: &str,
        theme: Theme,
        viewport: Viewport,
    ) -> Result<Option<Page>> {
        Ok(self
            .get(slug)?
            .map(|detail| render_detail(registry, &detail, theme, viewport)))
    }
}

/// Renders an already resolved trade.
pub fn render_detail(
    registry: &StyleRegistry,
    detail: &TradeDetail,
    theme: Theme,
    viewport: Viewport,
) -> Page {
    let input = RenderInput {
        trade_name: &detail.row.trade.name,
        style: registry.resolve(&detail.row.trade.slug),
        content: &detail.content,
        blueprint: detail.blueprints.get(theme),
        identity: detail.trade_identity.as_ref(),
        viewport,
    };
    render::render(theme, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog(temp: &TempDir) -> CatalogService {
        CatalogService::open(PathConfig::at(temp.path())).unwrap()
    }

    fn new_trade(slug: &str) -> NewTrade {
        NewTrade {
            name: "Pool Cleaner".to_string(),
            slug: slug.to_string(),
            description: "Sparkling pools".to_string(),
            icon: "droplet".to_string(),
        }
    }

    #[test]
    fn test_open_seeds_once() {
        let temp = TempDir::new().unwrap();
        assert_eq!(catalog(&temp).list().unwrap().len(), 16);
        // Reopening must not reseed
        assert_eq!(catalog(&temp).list().unwrap().len(), 16);
    }

    #[test]
    fn test_get_unknown_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(catalog(&temp).get("astronaut").unwrap().is_none());
    }

    #[test]
    fn test_create_then_conflict() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog(&temp);

        let row = catalog.create(new_trade("pool-cleaner")).unwrap();
        assert_eq!(row.trade.name, "Pool Cleaner");
        assert!(matches!(
            catalog.create(new_trade("pool-cleaner")),
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            catalog.create(new_trade("Pool Cleaner")),
            Err(ServiceError::Invalid(_))
        ));

        let detail = catalog.get("pool-cleaner").unwrap().unwrap();
        assert_eq!(detail.content.contact.email, "contact@pool-cleanerpros.com");
        assert_eq!(detail.blueprints.len(), 3);
        assert!(detail.trade_identity.is_none());
    }

    #[test]
    fn test_identity_takes_precedence() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog(&temp);
        let identity = serde_json::json!({
            "trade": "Plumber",
            "slug": "plumber",
            "tone": "calm",
            "tagline": "Dry Homes Guaranteed",
            "hero_patterns": ["Fast Plumbers in {city}"],
            "cta_options": {"primary": "Book Now", "secondary": "Prices", "emergency": "Call Now"},
            "color_palette": {
                "primary": "#112233", "secondary": "#445566", "accent": "#778899",
                "background": "#ffffff", "text": "#000000"
            }
        });
        fs::write(catalog.identity_path("plumber"), identity.to_string()).unwrap();

        let detail = catalog.get("plumber").unwrap().unwrap();
        assert!(detail.trade_identity.is_some());
        assert_eq!(detail.content.hero.cta_primary, "Book Now");
        assert_eq!(detail.content.hero.subheadline, "Dry Homes Guaranteed");

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["slug"], "plumber");
        assert!(json.get("tradeIdentity").is_some());
    }

    #[test]
    fn test_malformed_identity_is_ignored() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog(&temp);
        fs::write(catalog.identity_path("plumber"), "{ broken").unwrap();

        let detail = catalog.get("plumber").unwrap().unwrap();
        assert!(detail.trade_identity.is_none());
        assert_eq!(detail.content.hero.headline, "Professional Plumber Services");
    }

    #[test]
    fn test_render_page() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog(&temp);
        let registry = StyleRegistry::load_defaults().unwrap();

        let page = catalog
            .render_page(&registry, "roofer", Theme::Bold, Viewport::Mobile)
            .unwrap()
            .unwrap();
        assert_eq!(page.theme, Theme::Bold);
        assert!(catalog
            .render_page(&registry, "astronaut", Theme::Bold, Viewport::Mobile)
            .unwrap()
            .is_none());
    }
}
