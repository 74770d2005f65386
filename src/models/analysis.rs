//! Brand analysis profiles.
//!
//! The language model returns loosely-typed JSON. [`BrandProfile::from_value`]
//! is the only way into the generator: it trims, caps and coerces the raw
//! object and reports every invalid field instead of trusting the reply.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::identity::IdentityService;
use super::validation::{check_slug, ValidationErrors};
use super::RgbColor;

const MAX_TRADE_LEN: usize = 60;
const MAX_TEXT_LEN: usize = 300;
const MAX_CTA_EXAMPLES: usize = 5;
const MAX_IMAGE_TAGS: usize = 12;
const MAX_PAIN_POINTS: usize = 10;
const MAX_HERO_PATTERNS: usize = 5;
const MAX_SERVICES: usize = 8;

/// Validated brand profile, safe to materialize into files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Trade display name
    pub trade: String,
    /// Slug derived from the trade name
    pub slug: String,
    /// Guessed brand name of the analyzed site
    pub brand_name: Option<String>,
    /// Tone of voice
    pub tone: String,
    /// Target audience
    pub target_audience: Option<String>,
    /// Market positioning statement
    pub positioning: Option<String>,
    /// Hero layout impression
    pub hero_style: Option<String>,
    /// CTA style impression
    pub cta_style: Option<String>,
    /// Heading typography impression
    pub typography: Option<String>,
    /// Extracted colors
    pub palette: ProfilePalette,
    /// Example CTA texts seen on the site
    pub cta_examples: Vec<String>,
    /// CTA urgency (low, medium, high)
    pub urgency: Option<String>,
    /// Image search tags
    pub image_tags: Vec<String>,
    /// Hero headline patterns
    pub hero_patterns: Vec<String>,
    /// Customer pain points
    pub pain_points: Vec<String>,
    /// Services mentioned on the site
    pub services: Vec<IdentityService>,
}

/// Colors extracted from the analyzed site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePalette {
    /// Primary color (required)
    pub primary: RgbColor,
    /// Secondary color
    pub secondary: Option<RgbColor>,
    /// Accent color
    pub accent: Option<RgbColor>,
    /// Background color
    pub background: Option<RgbColor>,
}

impl BrandProfile {
    /// Validates a raw analysis object.
    ///
    /// Accepts both the structured reply format and the flattened format
    /// (`color_palette` as a list, `typography` as a string) returned by the
    /// analyze endpoint.
    ///
    /// # Errors
    ///
    /// Returns every failing field; nothing is partially accepted.
    pub fn from_value(raw: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let Some(obj) = raw.as_object() else {
            errors.push("$", "analysis must be a JSON object");
            return Err(errors);
        };

        let trade = text(obj.get("trade"), MAX_TRADE_LEN + 1).unwrap_or_default();
        if trade.is_empty() {
            errors.push("trade", "must not be empty");
        } else if trade.chars().count() > MAX_TRADE_LEN {
            errors.push("trade", format!("must be at most {MAX_TRADE_LEN} characters"));
        }

        let slug = slugify(&trade);
        if !trade.is_empty() {
            if let Err(message) = check_slug(&slug) {
                errors.push("trade", format!("does not produce a usable slug: {message}"));
            }
        }

        let palette = parse_palette(obj.get("color_palette"), &mut errors);

        let cta = obj.get("cta").and_then(Value::as_object);
        let typography = match obj.get("typography") {
            Some(Value::Object(t)) => text(t.get("heading_style"), MAX_TEXT_LEN),
            other => text(other, MAX_TEXT_LEN),
        };
        let hero_style = text(obj.get("hero_style"), MAX_TEXT_LEN).or_else(|| {
            nested(obj, "layout", "hero_layout").and_then(|v| text(Some(v), MAX_TEXT_LEN))
        });
        let cta_style = text(obj.get("cta_style"), MAX_TEXT_LEN)
            .or_else(|| cta.and_then(|c| text(c.get("style"), MAX_TEXT_LEN)));
        let image_tags = {
            let flat = list(obj.get("image_tags"), MAX_IMAGE_TAGS);
            if flat.is_empty() {
                list(nested(obj, "imagery", "image_tags"), MAX_IMAGE_TAGS)
            } else {
                flat
            }
        };

        let urgency = cta
            .and_then(|c| text(c.get("urgency_level"), MAX_TEXT_LEN))
            .map(|u| u.to_lowercase());
        if let Some(level) = &urgency {
            if !matches!(level.as_str(), "low" | "medium" | "high") {
                errors.push("cta.urgency_level", "must be one of low, medium, high");
            }
        }

        let services = match obj.get("services") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|s| {
                    let name = text(s.get("name"), MAX_TEXT_LEN)?;
                    Some(IdentityService {
                        name,
                        description: text(s.get("description"), MAX_TEXT_LEN).unwrap_or_default(),
                        icon: text(s.get("icon"), MAX_TEXT_LEN).unwrap_or_default(),
                    })
                })
                .take(MAX_SERVICES)
                .collect(),
            _ => Vec::new(),
        };

        let profile = Self {
            trade,
            slug,
            brand_name: text(obj.get("brand_name_guess"), MAX_TEXT_LEN),
            tone: text(obj.get("tone"), MAX_TEXT_LEN)
                .unwrap_or_else(|| super::identity::DEFAULT_TONE.to_string()),
            target_audience: text(obj.get("target_audience"), MAX_TEXT_LEN),
            positioning: text(obj.get("positioning"), MAX_TEXT_LEN),
            hero_style,
            cta_style,
            typography,
            palette: palette.unwrap_or(ProfilePalette {
                primary: RgbColor::new(0, 0, 0),
                secondary: None,
                accent: None,
                background: None,
            }),
            cta_examples: list(cta.and_then(|c| c.get("primary_text_examples")), MAX_CTA_EXAMPLES),
            urgency,
            image_tags,
            hero_patterns: list(obj.get("hero_patterns"), MAX_HERO_PATTERNS),
            pain_points: list(obj.get("pain_points"), MAX_PAIN_POINTS),
            services,
        };

        errors.into_result(profile)
    }

    /// Stable SHA-256 of the validated profile, used for idempotent generation.
    pub fn content_hash(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let digest = Sha256::digest(&canonical);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Primary CTA text, falling back to `fallback`.
    pub fn primary_cta(&self, fallback: &str) -> String {
        self.cta_examples
            .first()
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Returns true when the site pushes emergency-level urgency.
    pub fn is_urgent(&self) -> bool {
        self.urgency.as_deref() == Some("high")
    }
}

/// Adds the flattened fields expected by older consumers of analysis output.
///
/// `color_palette` becomes an ordered list (primary, secondary, accent,
/// background), `typography` becomes the heading style string, and
/// `hero_style`, `cta_style` and `image_tags` are lifted to the top level.
pub fn add_flattened_fields(analysis: &mut Value) {
    let Some(obj) = analysis.as_object_mut() else {
        return;
    };

    let palette: Vec<Value> = match obj.get("color_palette") {
        Some(Value::Object(p)) => ["primary", "secondary", "accent", "background"]
            .iter()
            .filter_map(|k| p.get(*k))
            .filter(|v| v.as_str().is_some_and(|s| !s.trim().is_empty()))
            .cloned()
            .collect(),
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };
    let hero_style = nested(obj, "layout", "hero_layout").cloned();
    let cta_style = nested(obj, "cta", "style").cloned();
    let typography = nested(obj, "typography", "heading_style").cloned();
    let image_tags = nested(obj, "imagery", "image_tags").cloned();

    obj.insert("color_palette".to_string(), Value::Array(palette));
    obj.insert("hero_style".to_string(), hero_style.unwrap_or(Value::Null));
    obj.insert("cta_style".to_string(), cta_style.unwrap_or(Value::Null));
    if let Some(t) = typography {
        obj.insert("typography".to_string(), t);
    }
    obj.insert(
        "image_tags".to_string(),
        image_tags.unwrap_or_else(|| Value::Array(Vec::new())),
    );
}

/// Derives a kebab-case slug from a trade name.
///
/// # Examples
///
/// ```
/// use tradeforge::models::analysis::slugify;
///
/// assert_eq!(slugify("Pool Cleaner"), "pool-cleaner");
/// assert_eq!(slugify("  Plumbing & Heating "), "plumbing-heating");
/// assert_eq!(slugify(""), "new-trade");
/// ```
pub fn slugify(trade: &str) -> String {
    let mut slug = String::with_capacity(trade.len());
    for c in trade.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "new-trade" } else { slug };
    // Collapse separators left behind by dropped characters ("a & b" -> "a--b")
    let mut out = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out
}

fn nested<'a>(obj: &'a Map<String, Value>, outer: &str, inner: &str) -> Option<&'a Value> {
    obj.get(outer)?.as_object()?.get(inner)
}

fn text(value: Option<&Value>, max: usize) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    Some(s.chars().take(max).collect())
}

fn list(value: Option<&Value>, max: usize) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| text(Some(v), MAX_TEXT_LEN))
            .take(max)
            .collect(),
        _ => Vec::new(),
    }
}

/// Parses a hex color, expanding 3-digit shorthand.
fn coerce_color(raw: &str) -> Option<RgbColor> {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
        return RgbColor::from_hex(&expanded).ok();
    }
    RgbColor::from_hex(hex).ok()
}

fn parse_palette(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<ProfilePalette> {
    const ROLES: [&str; 4] = ["primary", "secondary", "accent", "background"];

    let entries: Vec<(String, Option<&Value>)> = match value {
        Some(Value::Object(p)) => ROLES
            .iter()
            .map(|role| ((*role).to_string(), p.get(*role)))
            .collect(),
        Some(Value::Array(items)) => ROLES
            .iter()
            .enumerate()
            .map(|(i, role)| ((*role).to_string(), items.get(i)))
            .collect(),
        Some(Value::Null) | None => {
            errors.push("color_palette", "is required");
            return None;
        }
        Some(_) => {
            errors.push("color_palette", "must be an object or a list of hex colors");
            return None;
        }
    };

    let mut colors: [Option<RgbColor>; 4] = [None; 4];
    for (i, (role, v)) in entries.iter().enumerate() {
        match v {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if s.trim().is_empty() => {}
            Some(Value::String(s)) => match coerce_color(s) {
                Some(c) => colors[i] = Some(c),
                None => errors.push(
                    format!("color_palette.{role}"),
                    format!("'{s}' is not a hex color"),
                ),
            },
            Some(_) => errors.push(format!("color_palette.{role}"), "must be a string"),
        }
    }

    let Some(primary) = colors[0] else {
        if !errors
            .errors()
            .iter()
            .any(|e| e.field == "color_palette.primary")
        {
            errors.push("color_palette.primary", "is required");
        }
        return None;
    };

    Some(ProfilePalette {
        primary,
        secondary: colors[1],
        accent: colors[2],
        background: colors[3],
    })
}
