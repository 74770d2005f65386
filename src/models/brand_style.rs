//! Brand style records: the complete visual identity of a trade category.
//!
//! A [`BrandStyle`] carries every category-specific value the renderers
//! need, including the per-theme literals for the bold and luxury themes.
//! Records are produced by the style registry and are never mutated after
//! load.

use serde::{Deserialize, Serialize};

use super::RgbColor;

/// Complete brand style for one trade category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandStyle {
    /// Category slug (kebab-case)
    pub slug: String,
    /// Human-readable category name
    pub name: String,
    /// Font and heading settings
    pub typography: Typography,
    /// Structural layout choices
    pub layout: LayoutStyle,
    /// Spacing tokens (literal CSS lengths)
    pub spacing: Spacing,
    /// Brand colors
    pub color_palette: ColorPalette,
    /// Call-to-action button styling
    pub cta_style: CtaStyle,
    /// Photography treatment
    pub imagery: Imagery,
    /// Icon treatment
    pub icons: IconStyle,
    /// Animation settings
    pub motion: Motion,
    /// Component-level flags
    pub components: Components,
    /// Image URLs for this category
    pub media: Media,
    /// Per-theme values used by the bold and luxury themes
    pub themes: ThemeOverrides,
}

/// Typography settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Primary font family name
    pub font_family: String,
    /// Heading font weight (100-900)
    pub heading_weight: u16,
    /// Body font weight (100-900)
    pub body_weight: u16,
    /// CSS letter-spacing value
    pub letter_spacing: String,
    /// CSS text-transform applied to headings
    pub heading_transform: String,
    /// Unitless heading line-height
    pub line_height_heading: f64,
    /// Unitless body line-height
    pub line_height_body: f64,
}

/// Layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStyle {
    /// Named section spacing (compact, balanced, generous, airy)
    pub section_spacing: String,
    /// Max container width (CSS length)
    pub container_width: String,
    /// Corner radius in pixels
    pub border_radius: u32,
    /// Card style name
    pub card_style: String,
    /// Hero layout variant tag
    pub hero_layout: String,
    /// Services layout variant tag
    pub service_layout: String,
    /// Testimonials layout variant tag
    pub testimonial_layout: String,
    /// Content alignment (left or center)
    pub content_alignment: String,
}

/// Spacing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    /// Vertical section padding on narrow viewports
    pub section_padding_mobile: String,
    /// Vertical section padding on wide viewports
    pub section_padding_desktop: String,
    /// Inner card padding
    pub card_padding: String,
    /// Small gap
    pub gap_small: String,
    /// Medium gap
    pub gap_medium: String,
    /// Large gap
    pub gap_large: String,
}

/// Brand color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Primary brand color
    pub primary: RgbColor,
    /// Secondary color
    pub secondary: RgbColor,
    /// Accent color
    pub accent: RgbColor,
    /// Page background
    pub background: RgbColor,
    /// Card/section surface
    pub surface: RgbColor,
    /// Body text
    pub text: RgbColor,
    /// Muted text
    pub muted: RgbColor,
}

/// Call-to-action styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaStyle {
    /// CTA personality (urgent, bold, elegant, creative)
    #[serde(rename = "type")]
    pub kind: String,
    /// Button shape (rounded-lg, rounded-xl, rounded-full, sharp)
    pub button_shape: String,
    /// Button size (small, medium, large, xlarge)
    pub button_size: String,
    /// Primary button style (solid, gradient)
    pub primary_style: String,
    /// Secondary button style (outline, ghost, text-underline, outline-soft)
    pub secondary_style: String,
    /// Whether the CTA sticks to the bottom on narrow viewports
    pub sticky_mobile: bool,
    /// Icon position (left, right, none)
    pub icon_position: String,
}

/// Imagery treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imagery {
    /// Photography style tag
    pub style: String,
    /// Overlay drawn over the hero image
    pub hero_overlay: String,
    /// Hero image position
    pub hero_position: String,
    /// Image aspect ratio (e.g. "16/10")
    pub aspect_ratio: String,
    /// Image corner radius (CSS length)
    pub border_radius: String,
    /// Image shadow depth (none, sm, md, lg, xl, 2xl)
    pub shadow: String,
}

/// Icon treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconStyle {
    /// Icon stroke style
    pub style: String,
    /// Icon size
    pub size: String,
    /// Icon container shape
    pub container_style: String,
    /// Icon container background
    pub container_bg: String,
}

/// Motion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Scale factor applied on hover
    pub hover_scale: f64,
    /// Whether hover adds a shadow
    pub hover_shadow: bool,
    /// Named scroll animation
    pub scroll_animation: String,
    /// Animation duration in seconds
    pub animation_duration: f64,
    /// Delay between staggered children in seconds
    pub stagger_delay: f64,
}

/// Component-level flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    /// Navigation bar style
    pub nav_style: String,
    /// Whether cards draw a border
    pub card_border: bool,
    /// Card shadow depth
    pub card_shadow: String,
    /// Badge shape
    pub badge_style: String,
    /// Section divider style
    pub divider_style: String,
}

/// Image URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Hero image URL
    pub hero_image: String,
    /// Team/about image URL
    pub team_image: String,
    /// Gallery image URLs
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// Per-theme literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    /// Values for the bold theme
    pub bold: BoldOverrides,
    /// Values for the luxury theme
    pub luxury: LuxuryOverrides,
}

/// Values consumed by the bold theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoldOverrides {
    /// First word of the two-part logo
    pub logo_lead: String,
    /// Second word of the two-part logo
    pub logo_highlight: String,
    /// Paint the lead word in the accent color instead of the second word
    #[serde(default)]
    pub highlight_first: bool,
    /// Italicize the logo
    #[serde(default)]
    pub italic_logo: bool,
    /// Accent color
    pub accent: RgbColor,
    /// Secondary (banner/footer) color
    pub secondary: RgbColor,
    /// Hero section background
    pub hero_background: RgbColor,
    /// Skew of the decorative hero panel ("0deg" disables it)
    pub hero_skew: String,
    /// Hero image frame (offset or glow)
    pub image_frame: String,
    /// Hero image corner radius (CSS length)
    pub image_radius: String,
}

/// Values consumed by the luxury theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuxuryOverrides {
    /// Luxury brand name shown in nav and footer
    pub brand_name: String,
    /// Luxury tagline
    pub tagline: String,
    /// Heading font stack
    pub heading_font: String,
    /// Body font stack
    pub body_font: String,
    /// Navigation style (solid, transparent, floating, bordered)
    pub nav_style: String,
    /// Hero layout (editorial, split, centered, dramatic)
    pub hero_layout: String,
    /// Heading size (CSS length or clamp())
    pub heading_size: String,
    /// Heading weight
    pub heading_weight: u16,
    /// Heading letter spacing
    pub letter_spacing: String,
    /// Heading text transform
    pub text_transform: String,
    /// Button shape
    pub button_shape: String,
    /// Button style (outline, solid, gradient)
    pub button_style: String,
    /// Section divider (line, none, ornament, gradient)
    pub divider: String,
    /// Card style (minimal, bordered, elevated, glass)
    pub card_style: String,
    /// Full-bleed hero image URL
    pub hero_image: String,
    /// Story/about image URL
    pub story_image: String,
    /// Luxury color palette
    pub palette: LuxuryPalette,
}

/// Color palette for the luxury theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuxuryPalette {
    /// Page background
    pub bg: RgbColor,
    /// Surface
    pub surface: RgbColor,
    /// Accent
    pub accent: RgbColor,
    /// Gold highlight
    pub gold: RgbColor,
    /// Text
    pub text: RgbColor,
    /// Muted text
    pub muted: RgbColor,
    /// Navigation background; `None` renders a transparent bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_bg: Option<RgbColor>,
    /// Navigation text
    pub nav_text: RgbColor,
}

impl BrandStyle {
    /// Returns the names of required text fields that are empty.
    ///
    /// Colors are validated at parse time, so only free-form strings are
    /// checked here.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks: [(&'static str, &str); 12] = [
            ("slug", &self.slug),
            ("name", &self.name),
            ("typography.font_family", &self.typography.font_family),
            ("layout.container_width", &self.layout.container_width),
            ("layout.hero_layout", &self.layout.hero_layout),
            ("layout.service_layout", &self.layout.service_layout),
            ("layout.testimonial_layout", &self.layout.testimonial_layout),
            ("spacing.section_padding_desktop", &self.spacing.section_padding_desktop),
            ("cta_style.button_shape", &self.cta_style.button_shape),
            ("media.hero_image", &self.media.hero_image),
            ("themes.luxury.brand_name", &self.themes.luxury.brand_name),
            ("themes.bold.logo_lead", &self.themes.bold.logo_lead),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}
