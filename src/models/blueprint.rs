//! Per-theme blueprint records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page key whose section list drives the landing page.
pub const HOME_PAGE: &str = "home";

/// Theme-specific content and structure overrides for one trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Blueprint identifier (e.g. "plumber_A")
    pub id: String,
    /// Display name
    pub name: String,
    /// Conversion strategy (Trust, Fast Lead, Premium)
    pub strategy: String,
    /// Hero treatment tag
    pub hero_type: String,
    /// CTA strategy tag
    pub cta_strategy: String,
    /// Optional services layout hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_layout: Option<String>,
    /// Optional testimonial style hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial_style: Option<String>,
    /// Optional FAQ style hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq_style: Option<String>,
    /// Page name to ordered section names
    #[serde(default)]
    pub pages: BTreeMap<String, Vec<String>>,
    /// Content overrides
    pub content_rules: ContentRules,
    /// Optional media hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_style: Option<MediaStyle>,
}

/// Content overrides applied by a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRules {
    /// Tone of voice
    pub tone: String,
    /// CTA text overriding the identity CTA
    pub cta_text: String,
    /// Optional hero headline override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_headline: Option<String>,
    /// Optional hero sub-headline override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_subheadline: Option<String>,
    /// Optional urgency level (low, medium, high)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<String>,
}

/// Media hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStyle {
    /// Hero image treatment
    pub hero_images: String,
    /// Gallery treatment
    pub gallery: String,
    /// Icon treatment
    pub icons: String,
}

impl Blueprint {
    /// Returns the explicit home page section list, if any.
    pub fn home_sections(&self) -> Option<&[String]> {
        self.pages.get(HOME_PAGE).map(Vec::as_slice)
    }

    /// Returns true when the blueprint asks for emergency-level urgency.
    pub fn is_urgent(&self) -> bool {
        self.content_rules
            .urgency_level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case("high"))
    }

    /// Non-empty hero headline override.
    pub fn hero_headline(&self) -> Option<&str> {
        non_empty(self.content_rules.hero_headline.as_deref())
    }

    /// Non-empty hero sub-headline override.
    pub fn hero_subheadline(&self) -> Option<&str> {
        non_empty(self.content_rules.hero_subheadline.as_deref())
    }

    /// Non-empty CTA text override.
    pub fn cta_text(&self) -> Option<&str> {
        non_empty(Some(self.content_rules.cta_text.as_str()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
