//! Layout variant selection and page section ordering.

use serde::Serialize;

/// Hero layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroLayout {
    /// Text left, image right
    #[default]
    SplitRight,
    /// Full-bleed image with overlaid text
    FullWidthOverlay,
    /// Centered text above a wide image
    StackedCentered,
    /// Wide text column, narrow portrait image
    AsymmetricLeft,
}

/// Services layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceLayout {
    /// Three-column card grid
    #[default]
    Grid3,
    /// Numbered full-width rows
    ListHorizontal,
    /// Two columns, every third card spanning both
    Masonry2,
    /// Two columns of large cards
    Grid2Large,
}

/// Testimonials layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestimonialLayout {
    /// Card grid
    #[default]
    Cards,
    /// Bordered centered cards
    Slider,
    /// One featured quote
    QuoteLarge,
    /// Two quotes with avatars
    Minimal,
}

impl HeroLayout {
    /// Selects a variant from a style tag. Unknown or empty tags select the default.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "full-width-overlay" => Self::FullWidthOverlay,
            "stacked-centered" => Self::StackedCentered,
            "asymmetric-left" => Self::AsymmetricLeft,
            _ => Self::SplitRight,
        }
    }

    /// Canonical tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SplitRight => "split-right",
            Self::FullWidthOverlay => "full-width-overlay",
            Self::StackedCentered => "stacked-centered",
            Self::AsymmetricLeft => "asymmetric-left",
        }
    }
}

impl ServiceLayout {
    /// Selects a variant from a style tag. Unknown or empty tags select the default.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "list-horizontal" => Self::ListHorizontal,
            "masonry-2" => Self::Masonry2,
            "grid-2-large" => Self::Grid2Large,
            _ => Self::Grid3,
        }
    }

    /// Canonical tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid3 => "grid-3",
            Self::ListHorizontal => "list-horizontal",
            Self::Masonry2 => "masonry-2",
            Self::Grid2Large => "grid-2-large",
        }
    }
}

impl TestimonialLayout {
    /// Selects a variant from a style tag. Unknown or empty tags select the default.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "slider" => Self::Slider,
            "quote-large" => Self::QuoteLarge,
            "minimal" => Self::Minimal,
            _ => Self::Cards,
        }
    }

    /// Canonical tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Slider => "slider",
            Self::QuoteLarge => "quote-large",
            Self::Minimal => "minimal",
        }
    }
}

/// A landing page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    /// Hero banner
    Hero,
    /// Strip of trust symbols
    TrustBadges,
    /// Offered services
    Services,
    /// Reasons to choose the business
    WhyChooseUs,
    /// Company story
    About,
    /// Pull quote band
    Quote,
    /// Guarantees band
    Guarantees,
    /// Customer pain points
    PainPoints,
    /// Customer testimonials
    Testimonials,
    /// Frequently asked questions
    Faq,
    /// Closing call to action
    ContactCta,
    /// Page footer
    Footer,
}

impl SectionKind {
    /// Parses a blueprint section name.
    ///
    /// Matching ignores case, spaces, hyphens and underscores. Returns `None`
    /// for names no renderer knows.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradeforge::theme::SectionKind;
    ///
    /// assert_eq!(SectionKind::parse("ServiceCategories"), Some(SectionKind::Services));
    /// assert_eq!(SectionKind::parse("contact-cta"), Some(SectionKind::ContactCta));
    /// assert_eq!(SectionKind::parse("Gallery"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let kind = match key.as_str() {
            "hero" => Self::Hero,
            "trustbadges" | "trust" | "badges" => Self::TrustBadges,
            "services" | "servicecategories" | "service" => Self::Services,
            "whychooseus" | "why" => Self::WhyChooseUs,
            "about" | "story" | "philosophy" => Self::About,
            "quote" => Self::Quote,
            "guarantees" => Self::Guarantees,
            "painpoints" | "problems" => Self::PainPoints,
            "testimonials" | "reviews" => Self::Testimonials,
            "faq" | "faqs" => Self::Faq,
            "contactcta" | "contact" | "cta" => Self::ContactCta,
            "footer" => Self::Footer,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical blueprint name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::TrustBadges => "TrustBadges",
            Self::Services => "Services",
            Self::WhyChooseUs => "WhyChooseUs",
            Self::About => "About",
            Self::Quote => "Quote",
            Self::Guarantees => "Guarantees",
            Self::PainPoints => "PainPoints",
            Self::Testimonials => "Testimonials",
            Self::Faq => "FAQ",
            Self::ContactCta => "ContactCTA",
            Self::Footer => "Footer",
        }
    }
}

/// Computes the rendered section order.
///
/// An explicit blueprint list wins over `default`. Unknown names are skipped,
/// each section appears once (first occurrence wins) and `Footer` is always
/// last.
pub fn section_order(explicit: Option<&[String]>, default: &[SectionKind]) -> Vec<SectionKind> {
    let requested: Vec<SectionKind> = match explicit {
        Some(names) => names.iter().filter_map(|n| SectionKind::parse(n)).collect(),
        None => default.to_vec(),
    };

    let mut order = Vec::with_capacity(requested.len() + 1);
    for kind in requested {
        if kind != SectionKind::Footer && !order.contains(&kind) {
            order.push(kind);
        }
    }
    order.push(SectionKind::Footer);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_matches_empty_tag() {
        assert_eq!(HeroLayout::from_tag("zigzag"), HeroLayout::from_tag(""));
        assert_eq!(ServiceLayout::from_tag("carousel"), ServiceLayout::from_tag(""));
        assert_eq!(TestimonialLayout::from_tag("wall"), TestimonialLayout::from_tag(""));
        assert_eq!(HeroLayout::from_tag(""), HeroLayout::SplitRight);
    }

    #[test]
    fn test_known_tags_round_trip() {
        for tag in ["split-right", "full-width-overlay", "stacked-centered", "asymmetric-left"] {
            assert_eq!(HeroLayout::from_tag(tag).as_str(), tag);
        }
        for tag in ["grid-3", "list-horizontal", "masonry-2", "grid-2-large"] {
            assert_eq!(ServiceLayout::from_tag(tag).as_str(), tag);
        }
        for tag in ["cards", "slider", "quote-large", "minimal"] {
            assert_eq!(TestimonialLayout::from_tag(tag).as_str(), tag);
        }
    }

    #[test]
    fn test_explicit_order_is_preserved() {
        let names: Vec<String> = ["Testimonials", "Hero", "FAQ"].iter().map(|s| s.to_string()).collect();
        let order = section_order(Some(&names), &[SectionKind::Hero]);
        assert_eq!(
            order,
            vec![
                SectionKind::Testimonials,
                SectionKind::Hero,
                SectionKind::Faq,
                SectionKind::Footer
            ]
        );
    }

    #[test]
    fn test_duplicates_and_unknowns_are_dropped() {
        let names: Vec<String> = ["Hero", "Services", "ServiceCategories", "Gallery", "Footer", "Hero"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let order = section_order(Some(&names), &[]);
        assert_eq!(
            order,
            vec![SectionKind::Hero, SectionKind::Services, SectionKind::Footer]
        );
    }

    #[test]
    fn test_default_order_gets_footer() {
        let order = section_order(None, &[SectionKind::Hero, SectionKind::Services]);
        assert_eq!(order.last(), Some(&SectionKind::Footer));
        assert_eq!(order.iter().filter(|k| **k == SectionKind::Footer).count(), 1);
    }
}
