//! Trade identity profiles.
//!
//! An identity is the brand-voice record written for a generated trade
//! (`trades/{slug}.json`). When present it takes precedence over stored
//! content for everything textual.

use serde::{Deserialize, Serialize};

use super::RgbColor;

/// Brand identity of one trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIdentity {
    /// Trade display name (e.g. "Plumber")
    pub trade: String,
    /// Trade slug
    pub slug: String,
    /// Brand tone of voice
    pub tone: String,
    /// Short tagline
    pub tagline: String,
    /// Hero headline patterns; `{city}` is substituted at render time
    #[serde(default)]
    pub hero_patterns: Vec<String>,
    /// Customer pain points
    #[serde(default)]
    pub pain_points: Vec<String>,
    /// Offered services
    #[serde(default)]
    pub services: Vec<IdentityService>,
    /// CTA personality
    #[serde(default)]
    pub cta_style: String,
    /// CTA texts
    pub cta_options: CtaOptions,
    /// Image search tags
    #[serde(default)]
    pub image_tags: Vec<String>,
    /// Identity color palette
    pub color_palette: IdentityPalette,
    /// Trust symbols (e.g. "Licensed")
    #[serde(default)]
    pub trust_symbols: Vec<String>,
    /// Guarantees offered
    #[serde(default)]
    pub guarantees: Vec<String>,
    /// Customer testimonials
    #[serde(default)]
    pub testimonials: Vec<IdentityTestimonial>,
    /// Frequently asked questions
    #[serde(default)]
    pub faqs: Vec<IdentityFaq>,
}

/// A service offered by the trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityService {
    /// Service name
    pub name: String,
    /// Service description
    pub description: String,
    /// Icon key
    #[serde(default)]
    pub icon: String,
}

/// Call-to-action texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaOptions {
    /// Primary CTA
    pub primary: String,
    /// Secondary CTA
    pub secondary: String,
    /// Emergency CTA
    pub emergency: String,
}

impl Default for CtaOptions {
    fn default() -> Self {
        Self {
            primary: "Get Started".to_string(),
            secondary: "Learn More".to_string(),
            emergency: "Call Now".to_string(),
        }
    }
}

/// Identity color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityPalette {
    /// Primary color
    pub primary: RgbColor,
    /// Secondary color
    pub secondary: RgbColor,
    /// Accent color
    pub accent: RgbColor,
    /// Background color
    pub background: RgbColor,
    /// Text color
    pub text: RgbColor,
}

impl Default for IdentityPalette {
    fn default() -> Self {
        Self {
            primary: RgbColor::new(0x3b, 0x82, 0xf6),
            secondary: RgbColor::new(0xf1, 0xf5, 0xf9),
            accent: RgbColor::new(0xef, 0x44, 0x44),
            background: RgbColor::new(0xff, 0xff, 0xff),
            text: RgbColor::new(0x0f, 0x17, 0x2a),
        }
    }
}

/// A testimonial as written in an identity profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityTestimonial {
    /// Quote text
    pub quote: String,
    /// Author name
    pub author: String,
    /// Author location
    #[serde(default)]
    pub location: String,
    /// Rating (1-5)
    pub rating: u8,
}

/// A question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFaq {
    /// Question
    pub question: String,
    /// Answer
    pub answer: String,
}

/// Fallback tone when no identity is available.
pub const DEFAULT_TONE: &str = "professional, reliable, trustworthy";

/// Fallback tagline when no identity is available.
pub const DEFAULT_TAGLINE: &str = "Quality Service You Can Trust";

/// Which CTA text to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaKind {
    /// Main action
    Primary,
    /// Secondary action
    Secondary,
    /// Emergency action
    Emergency,
}

/// Returns the CTA text of the given kind, falling back to generic copy.
pub fn cta_text(identity: Option<&TradeIdentity>, kind: CtaKind) -> String {
    let defaults = CtaOptions::default();
    let options = identity.map_or(&defaults, |i| &i.cta_options);
    match kind {
        CtaKind::Primary => options.primary.clone(),
        CtaKind::Secondary => options.secondary.clone(),
        CtaKind::Emergency => options.emergency.clone(),
    }
}

/// Returns the identity tagline or the generic fallback.
pub fn tagline(identity: Option<&TradeIdentity>) -> String {
    identity.map_or_else(|| DEFAULT_TAGLINE.to_string(), |i| i.tagline.clone())
}
