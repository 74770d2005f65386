//! Theme renderers.
//!
//! Each theme turns a style record, page content and an optional blueprint
//! into a [`Page`]: an ordered list of typed sections with per-viewport
//! classes. Pages serialize to JSON or render to a standalone HTML document.
//!
//! Renderers contain no per-category values. Everything that varies by
//! trade comes from the [`BrandStyle`] record, including the theme overrides.

mod bold;
mod clean;
pub mod html;
mod luxury;
pub mod page;

pub use page::{
    Block, Button, Card, CardList, Feature, FooterBlock, FooterColumn, Frame, HeroBlock, Image,
    Link, LogoPart, Nav, Page, Quote, Section, TestimonialCard, TestimonialList, TopBar,
};

use anyhow::{bail, Result};
use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::identity::{self, CtaKind};
use crate::models::{Blueprint, BrandStyle, ContentRecord, TradeIdentity};
use crate::models::Testimonial;
use crate::theme::resolver::{declarations, shadow_class};
use crate::theme::{self, ResolvedStyle};

/// A visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Clean & Trust (blueprint A)
    Clean,
    /// Bold & Conversion (blueprint B)
    Bold,
    /// Premium & Luxury (blueprint C)
    Luxury,
}

impl Theme {
    /// All themes in blueprint letter order.
    pub const ALL: [Self; 3] = [Self::Clean, Self::Bold, Self::Luxury];

    /// URL/CLI identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Bold => "bold",
            Self::Luxury => "luxury",
        }
    }

    /// Blueprint letter.
    pub const fn letter(self) -> char {
        match self {
            Self::Clean => 'A',
            Self::Bold => 'B',
            Self::Luxury => 'C',
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clean => "Clean & Trust",
            Self::Bold => "Bold & Conversion",
            Self::Luxury => "Premium & Luxury",
        }
    }

    /// One-line description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Clean => {
                "Minimalist, trustworthy palette ideal for service professionals who value clarity."
            }
            Self::Bold => "High contrast, aggressive typography designed to maximize lead capture.",
            Self::Luxury => {
                "Elegant dark aesthetic with gold accents for high-end service providers."
            }
        }
    }

    /// Looks up a theme by id (`clean`) or letter (`A`).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(id) || id.eq_ignore_ascii_case(&t.letter().to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::from_id(s) {
            Some(theme) => Ok(theme),
            None => bail!("Unknown theme '{s}'. Expected clean, bold or luxury"),
        }
    }
}

/// Viewport class a page is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Narrow (375px)
    Mobile,
    /// Medium (768px)
    Tablet,
    /// Wide
    #[default]
    Desktop,
}

impl Viewport {
    /// Identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    /// Reference width in CSS pixels.
    pub const fn width_px(self) -> u32 {
        match self {
            Self::Mobile => 375,
            Self::Tablet => 768,
            Self::Desktop => 1280,
        }
    }

    /// Returns true for the narrow viewport.
    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

impl FromStr for Viewport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            _ => bail!("Unknown viewport '{s}'. Expected mobile, tablet or desktop"),
        }
    }
}

/// Discrete typography and spacing values for one theme at one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scale {
    /// Hero headline size
    pub display: &'static str,
    /// Section heading size
    pub heading: &'static str,
    /// Body copy size
    pub body: &'static str,
    /// Vertical section padding
    pub section_py: &'static str,
    /// Horizontal page padding
    pub page_px: &'static str,
    /// Grid columns for card lists
    pub columns: u8,
}

impl Scale {
    /// Looks up the scale for a theme and viewport.
    pub const fn of(theme: Theme, viewport: Viewport) -> Self {
        match (theme, viewport) {
            (Theme::Clean, Viewport::Mobile) => Self::new("2rem", "1.25rem", "0.875rem", "var(--brand-section-py-mobile)", "1rem", 1),
            (Theme::Clean, Viewport::Tablet) => Self::new("2.25rem", "1.5rem", "1rem", "3rem", "1.5rem", 2),
            (Theme::Clean, Viewport::Desktop) => Self::new("3.75rem", "2.25rem", "1.125rem", "var(--brand-section-py)", "2rem", 3),
            (Theme::Bold, Viewport::Mobile) => Self::new("1.75rem", "1.25rem", "0.875rem", "2.5rem", "1rem", 1),
            (Theme::Bold, Viewport::Tablet) => Self::new("2.5rem", "1.875rem", "1rem", "3rem", "1.5rem", 2),
            (Theme::Bold, Viewport::Desktop) => Self::new("4.5rem", "3rem", "1.25rem", "6rem", "2rem", 3),
            (Theme::Luxury, Viewport::Mobile) => Self::new("2.25rem", "1.5rem", "0.875rem", "4rem", "1.5rem", 1),
            (Theme::Luxury, Viewport::Tablet) => Self::new("3.75rem", "2.25rem", "1rem", "6rem", "2rem", 2),
            (Theme::Luxury, Viewport::Desktop) => Self::new("6rem", "3rem", "1.125rem", "8rem", "4rem", 2),
        }
    }

    #[allow(clippy::too_many_arguments)]
    const fn new(
        display: &'static str,
        heading: &'static str,
        body: &'static str,
        section_py: &'static str,
        page_px: &'static str,
        columns: u8,
    ) -> Self {
        Self {
            display,
            heading,
            body,
            section_py,
            page_px,
            columns,
        }
    }

    /// Inline declarations exposing the scale to the stylesheet.
    pub fn declarations(&self) -> String {
        format!(
            "--display-size: {}; --heading-size: {}; --body-size: {}; --section-py: {}; --page-px: {}; --columns: {};",
            self.display, self.heading, self.body, self.section_py, self.page_px, self.columns
        )
    }
}

/// Everything a renderer needs for one page.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Trade display name
    pub trade_name: &'a str,
    /// Style record
    pub style: &'a BrandStyle,
    /// Page content
    pub content: &'a ContentRecord,
    /// Blueprint for the theme, if any
    pub blueprint: Option<&'a Blueprint>,
    /// Identity record, if any
    pub identity: Option<&'a TradeIdentity>,
    /// Target viewport
    pub viewport: Viewport,
}

/// Values derived once per render and shared by every section.
pub(crate) struct Context<'a> {
    pub input: RenderInput<'a>,
    pub theme: Theme,
    pub resolved: ResolvedStyle,
    pub scale: Scale,
    pub headline: String,
    pub subheadline: String,
    pub cta_primary: String,
    pub cta_secondary: String,
    pub cta_emergency: String,
    pub tagline: String,
    pub urgent: bool,
    pub year: i32,
}

impl<'a> Context<'a> {
    fn new(input: RenderInput<'a>, theme: Theme) -> Self {
        let hero = &input.content.hero;
        let blueprint = input.blueprint;

        let headline = blueprint
            .and_then(Blueprint::hero_headline)
            .map_or_else(|| hero.headline.clone(), str::to_string);
        let subheadline = blueprint
            .and_then(Blueprint::hero_subheadline)
            .map_or_else(|| hero.subheadline.clone(), str::to_string);
        let cta_primary = blueprint
            .and_then(Blueprint::cta_text)
            .map_or_else(|| hero.cta_primary.clone(), str::to_string);

        Self {
            resolved: theme::resolve(input.style, theme.id()),
            scale: Scale::of(theme, input.viewport),
            headline,
            subheadline,
            cta_primary,
            cta_secondary: hero.cta_secondary.clone(),
            cta_emergency: identity::cta_text(input.identity, CtaKind::Emergency),
            tagline: identity::tagline(input.identity),
            urgent: blueprint.is_some_and(Blueprint::is_urgent),
            year: chrono::Utc::now().year(),
            input,
            theme,
        }
    }

    pub fn style(&self) -> &'a BrandStyle {
        self.input.style
    }

    pub fn content(&self) -> &'a ContentRecord {
        self.input.content
    }

    pub fn viewport(&self) -> Viewport {
        self.input.viewport
    }

    /// Picks one of three values by viewport.
    pub fn pick<T>(&self, mobile: T, tablet: T, desktop: T) -> T {
        match self.input.viewport {
            Viewport::Mobile => mobile,
            Viewport::Tablet => tablet,
            Viewport::Desktop => desktop,
        }
    }

    /// Section frame carrying the viewport class and scale variables.
    pub fn section_frame(&self, class: &str, style: impl Into<String>) -> Frame {
        let style = style.into();
        Frame {
            class: format!("section vp-{} {class}", self.input.viewport.id()),
            style: if style.is_empty() {
                self.scale.declarations()
            } else {
                format!("{} {style}", self.scale.declarations())
            },
        }
    }

    /// Root wrapper: brand classes, entrance animation and CSS variables.
    pub fn root_frame(&self, extra_style: &str) -> Frame {
        Frame {
            class: format!(
                "{} {} vp-{}",
                self.resolved.classes.root,
                self.resolved.classes.motion,
                self.input.viewport.id()
            ),
            style: format!("{} {extra_style}", declarations(&self.resolved.variables)),
        }
    }

    /// Primary call-to-action button.
    pub fn primary_button(&self, label: &str, href: &str) -> Button {
        Button {
            label: label.to_string(),
            href: href.to_string(),
            frame: Frame::new(
                format!("{} {}", self.resolved.classes.button_primary, self.resolved.classes.hover),
                "",
            ),
        }
    }

    /// Secondary call-to-action button.
    pub fn secondary_button(&self, label: &str, href: &str) -> Button {
        Button {
            label: label.to_string(),
            href: href.to_string(),
            frame: Frame::new(self.resolved.classes.button_secondary.clone(), ""),
        }
    }

    /// Button with explicit styling.
    pub fn styled_button(&self, label: &str, href: &str, class: &str, style: String) -> Button {
        Button {
            label: label.to_string(),
            href: href.to_string(),
            frame: Frame::new(class, style),
        }
    }

    /// Image using the brand imagery radius and shadow.
    pub fn image(&self, src: &str, alt: &str, class: &str) -> Option<Image> {
        if src.trim().is_empty() {
            return None;
        }
        let imagery = &self.style().imagery;
        let mut classes = vec!["img".to_string()];
        if !class.is_empty() {
            classes.push(class.to_string());
        }
        if let Some(shadow) = shadow_class(&imagery.shadow) {
            classes.push(shadow.to_string());
        }
        Some(Image {
            src: src.to_string(),
            alt: alt.to_string(),
            frame: Frame::new(
                classes.join(" "),
                format!(
                    "border-radius: var(--brand-image-radius); aspect-ratio: {};",
                    imagery.aspect_ratio.replace('/', " / ")
                ),
            ),
        })
    }

    /// Card classes with hover effects.
    pub fn card_frame(&self) -> Frame {
        Frame::new(
            format!("{} {}", self.resolved.classes.card, self.resolved.classes.hover),
            "",
        )
    }

    /// `tel:` link for the contact phone number.
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .content()
            .contact
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }

    /// Copyright line.
    pub fn legal(&self, brand: &str, rights: bool) -> String {
        if rights {
            format!("\u{a9} {} {brand}. All rights reserved.", self.year)
        } else {
            format!("\u{a9} {} {brand}", self.year)
        }
    }

    /// Explicit blueprint section list, if any.
    pub fn blueprint_sections(&self) -> Option<&'a [String]> {
        self.input.blueprint.and_then(Blueprint::home_sections)
    }

    /// Page title and SEO fields.
    pub fn page_shell(&self, nav: Nav, sections: Vec<Section>, root: Frame) -> Page {
        let seo = &self.content().seo;
        Page {
            title: seo.title.clone(),
            description: seo.description.clone(),
            keywords: seo.keywords.clone(),
            theme: self.theme,
            viewport: self.viewport(),
            slug: self.style().slug.clone(),
            variables: self.resolved.variables.clone(),
            motion: self.resolved.motion.clone(),
            root,
            nav,
            sections,
        }
    }
}

/// Converts stored testimonials to cards.
pub(crate) fn testimonial_cards<'t>(
    items: impl IntoIterator<Item = &'t Testimonial>,
) -> Vec<TestimonialCard> {
    items
        .into_iter()
        .map(|t| TestimonialCard {
            text: t.content.clone(),
            author: t.author.clone(),
            role: t.role.clone(),
            rating: t.rating.clamp(1, 5),
        })
        .collect()
}

/// Two-digit ordinal label ("01").
pub(crate) fn ordinal(index: usize) -> String {
    format!("{:02}", index + 1)
}

/// A swappable presentational layout.
pub(crate) trait ThemeRenderer {
    /// Builds the page for `ctx`.
    fn render(&self, ctx: &Context<'_>) -> Page;
}

fn renderer(theme: Theme) -> &'static dyn ThemeRenderer {
    match theme {
        Theme::Clean => &clean::CleanTheme,
        Theme::Bold => &bold::BoldTheme,
        Theme::Luxury => &luxury::LuxuryTheme,
    }
}

/// Renders a page for `theme`.
pub fn render(theme: Theme, input: RenderInput<'_>) -> Page {
    let ctx = Context::new(input, theme);
    renderer(theme).render(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup() {
        assert_eq!(Theme::from_id("bold"), Some(Theme::Bold));
        assert_eq!(Theme::from_id("C"), Some(Theme::Luxury));
        assert_eq!(Theme::from_id("LUXURY"), Some(Theme::Luxury));
        assert_eq!(Theme::from_id("retro"), None);
        assert!("retro".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_letters_are_ordered() {
        let letters: String = Theme::ALL.iter().map(|t| t.letter()).collect();
        assert_eq!(letters, "ABC");
    }

    #[test]
    fn test_viewport_parse() {
        assert_eq!("Mobile".parse::<Viewport>().unwrap(), Viewport::Mobile);
        assert!("watch".parse::<Viewport>().is_err());
        assert_eq!(Viewport::default(), Viewport::Desktop);
    }

    #[test]
    fn test_scales_are_discrete_per_viewport() {
        for theme in Theme::ALL {
            let mobile = Scale::of(theme, Viewport::Mobile);
            let desktop = Scale::of(theme, Viewport::Desktop);
            assert_ne!(mobile.display, desktop.display);
            assert_eq!(mobile.columns, 1);
        }
    }
}
