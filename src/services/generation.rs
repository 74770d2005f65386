//! Brand generation from a validated analysis profile.
//!
//! A generated trade is a style record, an identity record, three blueprints
//! and a store row. All of them appear together or not at all:
//!
//! 1. every file is written under a staging name;
//! 2. the trade row and content are inserted inside a store transaction;
//! 3. staged files are renamed into place before the transaction commits.
//!
//! Any failure removes staged and already renamed files and rolls the
//! transaction back.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::blueprints::{file_name, BlueprintSet};
use super::catalog::CatalogService;
use super::ServiceError;
use crate::models::analysis::BrandProfile;
use crate::models::blueprint::HOME_PAGE;
use crate::models::{
    Blueprint, BrandStyle, ContentRecord, ContentRules, CtaOptions, IdentityPalette, RgbColor,
    Trade, TradeIdentity,
};
use crate::registry::{self, StyleRegistry};
use crate::render::Theme;
use crate::store::{StoreError, TradeRow};

/// Icon given to generated trades.
const GENERATED_ICON: &str = "star";

/// Result of a generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    /// Trade display name
    pub trade: String,
    /// Trade slug
    pub slug: String,
    /// Generated blueprints keyed by theme name
    pub blueprints: BlueprintSet,
    /// Resolved style record to add to the registry
    #[serde(skip)]
    pub style: BrandStyle,
    /// False when an identical profile had already been generated
    #[serde(skip)]
    pub created: bool,
}

/// Materializes analysis profiles into trades.
#[derive(Clone)]
pub struct BrandGenerator {
    catalog: CatalogService,
}

impl BrandGenerator {
    /// Creates a generator writing through `catalog`.
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// Validates `raw` and generates its trade.
    ///
    /// `registry` supplies the design system the new style extends. The
    /// caller publishes `outcome.style` in a new registry snapshot.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Invalid`] when the profile fails validation
    /// - [`ServiceError::Conflict`] when the slug exists with a different profile
    /// - [`ServiceError::Internal`] on I/O or storage failure (nothing is kept)
    pub fn generate(
        &self,
        registry: &StyleRegistry,
        raw: &Value,
    ) -> Result<GenerationOutcome, ServiceError> {
        let profile = BrandProfile::from_value(raw)?;
        let hash = profile.content_hash();
        let slug = profile.slug.clone();

        if let Some(row) = self.catalog.store().get(&slug)? {
            return self.existing(registry, &row, &hash);
        }

        let identity = build_identity(&profile);
        let content = ContentRecord::from_identity(&identity);
        let trade = Trade {
            slug: slug.clone(),
            name: profile.trade.clone(),
            icon: GENERATED_ICON.to_string(),
            description: format!("Premium {} brand generated from analysis.", profile.trade),
        };

        let document = style_document(&profile);
        let style = registry::resolve_with(registry, document.clone())
            .with_context(|| format!("Generated style for '{slug}' is incomplete"))?;

        let blueprints = build_blueprints(&profile);
        let files = self.planned_files(&slug, &document, &identity, &blueprints)?;

        let row = match self.commit(&trade, &content, &hash, &files) {
            Ok(row) => row,
            Err(StoreError::Conflict(_)) => {
                // Another request inserted the slug between the lookup and the insert
                let row = self
                    .catalog
                    .store()
                    .get(&slug)?
                    .ok_or_else(|| ServiceError::Conflict(slug.clone()))?;
                return self.existing(registry, &row, &hash);
            }
            Err(e) => return Err(e.into()),
        };

        info!(slug = %row.trade.slug, base = %style_base(&profile), "Generated trade");

        let mut set = BlueprintSet::default();
        for (theme, blueprint) in blueprints {
            set.set(theme, blueprint);
        }

        Ok(GenerationOutcome {
            trade: row.trade.name,
            slug,
            blueprints: set,
            style,
            created: true,
        })
    }

    fn existing(
        &self,
        registry: &StyleRegistry,
        row: &TradeRow,
        hash: &str,
    ) -> Result<GenerationOutcome, ServiceError> {
        if row.profile_hash.as_deref() != Some(hash) {
            return Err(ServiceError::Conflict(row.trade.slug.clone()));
        }

        debug!(slug = %row.trade.slug, "Profile already generated");
        Ok(GenerationOutcome {
            trade: row.trade.name.clone(),
            slug: row.trade.slug.clone(),
            blueprints: self.catalog.blueprint_loader().load_exact(&row.trade.slug),
            style: registry.resolve(&row.trade.slug).clone(),
            created: false,
        })
    }

    /// Final paths and serialized contents of every generated file.
    fn planned_files(
        &self,
        slug: &str,
        document: &Value,
        identity: &TradeIdentity,
        blueprints: &[(Theme, Blueprint)],
    ) -> Result<Vec<(PathBuf, String)>> {
        let paths = self.catalog.paths();
        let mut files = vec![
            (
                paths.styles_dir().join(format!("{slug}.json")),
                serde_json::to_string_pretty(document).context("Failed to serialize style")?,
            ),
            (
                self.catalog.identity_path(slug),
                serde_json::to_string_pretty(identity).context("Failed to serialize identity")?,
            ),
        ];
        for (theme, blueprint) in blueprints {
            files.push((
                paths.blueprints_dir().join(file_name(slug, *theme)),
                serde_json::to_string_pretty(blueprint)
                    .with_context(|| format!("Failed to serialize blueprint {}", blueprint.id))?,
            ));
        }
        Ok(files)
    }

    fn commit(
        &self,
        trade: &Trade,
        content: &ContentRecord,
        hash: &str,
        files: &[(PathBuf, String)],
    ) -> Result<TradeRow, StoreError> {
        let stage_id = Uuid::new_v4();
        let mut staged = Vec::with_capacity(files.len());
        let mut renamed = Vec::with_capacity(files.len());

        let result = stage_files(&self.catalog, files, stage_id, &mut staged)
            .map_err(StoreError::Aborted)
            .and_then(|()| {
                self.catalog
                    .store()
                    .insert_with(trade, content, Some(hash), || {
                        for (staged_path, final_path) in &staged {
                            fs::rename(staged_path, final_path).with_context(|| {
                                format!("Failed to move {} into place", final_path.display())
                            })?;
                            renamed.push(final_path.clone());
                        }
                        Ok(())
                    })
            });

        if result.is_err() {
            warn!(slug = %trade.slug, "Generation failed, removing written files");
            for path in staged.iter().map(|(s, _)| s).chain(renamed.iter()) {
                remove_quietly(path);
            }
        }
        result
    }
}

fn stage_files(
    catalog: &CatalogService,
    files: &[(PathBuf, String)],
    stage_id: Uuid,
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<()> {
    catalog.paths().ensure_dirs()?;
    for (final_path, contents) in files {
        let path = staged_path(final_path, stage_id);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        staged.push((path, final_path.clone()));
    }
    Ok(())
}

/// `{final}.{id}.staged`
fn staged_path(final_path: &Path, stage_id: Uuid) -> PathBuf {
    let mut name = OsString::from(final_path.as_os_str());
    name.push(format!(".{stage_id}.staged"));
    PathBuf::from(name)
}

fn remove_quietly(path: &Path) {
    if path.is_file() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "Failed to remove file");
        }
    }
}

/// Base design system for the profile's hero impression.
fn style_base(profile: &BrandProfile) -> &'static str {
    let hero = profile.hero_style.as_deref().unwrap_or_default().to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| hero.contains(w));
    if has(&["overlay", "full", "dramatic", "image"]) {
        "electrician"
    } else if has(&["center", "stack"]) {
        "landscaper"
    } else if has(&["asym", "left"]) {
        "painter"
    } else {
        registry::DEFAULT_SLUG
    }
}

fn tagline(profile: &BrandProfile) -> String {
    profile
        .positioning
        .clone()
        .unwrap_or_else(|| format!("Professional {} Services", profile.trade))
}

fn has_dark_background(profile: &BrandProfile) -> bool {
    profile.palette.background.is_some_and(|b| b.is_dark())
}

/// Sparse style document: the base design system plus profile colors.
fn style_document(profile: &BrandProfile) -> Value {
    let palette = &profile.palette;

    let mut colors = Map::new();
    colors.insert("primary".to_string(), json!(palette.primary));
    for (key, color) in [
        ("secondary", palette.secondary),
        ("accent", palette.accent),
        ("background", palette.background),
    ] {
        if let Some(color) = color {
            colors.insert(key.to_string(), json!(color));
        }
    }
    if has_dark_background(profile) {
        colors.insert("text".to_string(), json!("#F8FAFC"));
        colors.insert("surface".to_string(), json!("#1E293B"));
        colors.insert("muted".to_string(), json!("#94A3B8"));
    }

    let (logo_lead, logo_highlight) = logo_parts(&profile.trade);
    let accent = palette.accent.unwrap_or(palette.primary);

    json!({
        "extends": style_base(profile),
        "slug": profile.slug,
        "name": profile.trade,
        "color_palette": colors,
        "themes": {
            "bold": {
                "logo_lead": logo_lead,
                "logo_highlight": logo_highlight,
                "accent": accent,
                "secondary": palette.primary,
            },
            "luxury": {
                "brand_name": profile.brand_name.clone().unwrap_or_else(|| profile.trade.clone()),
                "tagline": tagline(profile),
                "palette": { "accent": palette.primary },
            },
        },
    })
}

/// Splits a trade name into the two logo parts of the bold theme.
fn logo_parts(trade: &str) -> (String, String) {
    let words: Vec<String> = trade.split_whitespace().map(str::to_uppercase).collect();
    match words.split_last() {
        Some((last, rest)) if !rest.is_empty() => (rest.join(" "), last.clone()),
        Some((only, _)) => (only.clone(), "PRO".to_string()),
        None => ("TRADE".to_string(), "PRO".to_string()),
    }
}

fn build_identity(profile: &BrandProfile) -> TradeIdentity {
    let trade = &profile.trade;
    let defaults = IdentityPalette::default();
    let palette = &profile.palette;

    let hero_patterns = if profile.hero_patterns.is_empty() {
        vec![format!("Expert {trade} in {{city}}")]
    } else {
        profile
            .hero_patterns
            .iter()
            .map(|p| p.replace("{trade}", trade))
            .collect()
    };

    let pain_points = if profile.pain_points.is_empty() {
        vec!["Emergency repairs".to_string(), "Professional service".to_string()]
    } else {
        profile.pain_points.clone()
    };

    let text = if has_dark_background(profile) {
        RgbColor::new(0xf8, 0xfa, 0xfc)
    } else {
        defaults.text
    };

    TradeIdentity {
        trade: trade.clone(),
        slug: profile.slug.clone(),
        tone: profile.tone.clone(),
        tagline: tagline(profile),
        hero_patterns,
        pain_points,
        services: profile.services.clone(),
        cta_style: profile.cta_style.clone().unwrap_or_default(),
        cta_options: CtaOptions {
            primary: profile.primary_cta("Get Quote"),
            secondary: "Learn More".to_string(),
            emergency: if profile.is_urgent() { "Call Now" } else { "Contact Us" }.to_string(),
        },
        image_tags: profile.image_tags.clone(),
        color_palette: IdentityPalette {
            primary: palette.primary,
            secondary: palette.secondary.unwrap_or(defaults.secondary),
            accent: palette.accent.unwrap_or(defaults.accent),
            background: palette.background.unwrap_or(defaults.background),
            text,
        },
        trust_symbols: vec!["Licensed".to_string(), "Insured".to_string()],
        guarantees: vec!["100% Satisfaction".to_string()],
        testimonials: Vec::new(),
        faqs: Vec::new(),
    }
}

fn build_blueprints(profile: &BrandProfile) -> Vec<(Theme, Blueprint)> {
    let strategies = [
        (Theme::Clean, "Trust"),
        (Theme::Bold, "Fast Lead"),
        (Theme::Luxury, "Premium"),
    ];

    strategies
        .into_iter()
        .map(|(theme, strategy)| {
            let letter = theme.letter();
            let pages = BTreeMap::from([(
                HOME_PAGE.to_string(),
                vec![
                    "hero".to_string(),
                    "services".to_string(),
                    "testimonials".to_string(),
                ],
            )]);
            let blueprint = Blueprint {
                id: format!("{}_{letter}", profile.slug),
                name: format!("{} Blueprint {letter}", profile.trade),
                strategy: strategy.to_string(),
                hero_type: profile.hero_style.clone().unwrap_or_else(|| "split-right".to_string()),
                cta_strategy: profile.cta_style.clone().unwrap_or_else(|| "quote".to_string()),
                service_layout: None,
                testimonial_style: None,
                faq_style: None,
                pages,
                content_rules: ContentRules {
                    tone: profile.tone.clone(),
                    cta_text: profile.primary_cta("Contact Us"),
                    hero_headline: None,
                    hero_subheadline: None,
                    urgency_level: profile.urgency.clone(),
                },
                media_style: None,
            };
            (theme, blueprint)
        })
        .collect()
}
