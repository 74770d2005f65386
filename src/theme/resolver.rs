//! Style resolution: brand style records to CSS custom properties and
//! utility class names.
//!
//! Everything here is a pure function of the [`BrandStyle`]. Class names
//! map onto the rules in the page stylesheet shipped with every rendered
//! page.

use serde::Serialize;

use crate::models::BrandStyle;

/// A CSS custom property (`--name: value`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssVar {
    /// Property name including the leading `--`
    pub name: String,
    /// Literal CSS value
    pub value: String,
}

/// Which call-to-action button to style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled main action
    Primary,
    /// Secondary action
    Secondary,
}

/// Entrance animation derived from the brand motion settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionVariant {
    /// Animation name (fade-up, fade, slide-in, scale-fade)
    pub name: &'static str,
    /// Starting opacity
    pub from_opacity: f64,
    /// Starting horizontal offset in px
    pub from_x: i32,
    /// Starting vertical offset in px
    pub from_y: i32,
    /// Starting scale
    pub from_scale: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Delay between staggered children in seconds
    pub stagger: f64,
}

/// Utility class strings for a style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilityClasses {
    /// Root wrapper classes (`brand-{slug} theme-{theme}`)
    pub root: String,
    /// Primary button
    pub button_primary: String,
    /// Secondary button
    pub button_secondary: String,
    /// Cards
    pub card: String,
    /// Hover effect
    pub hover: String,
    /// Entrance animation class
    pub motion: String,
}

/// Everything the renderers need from a style record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStyle {
    /// Ordered CSS custom properties
    pub variables: Vec<CssVar>,
    /// Utility classes
    pub classes: UtilityClasses,
    /// Entrance animation
    pub motion: MotionVariant,
}

/// Resolves a style for the given theme id.
pub fn resolve(style: &BrandStyle, theme: &str) -> ResolvedStyle {
    let motion = motion_variant(style);
    ResolvedStyle {
        variables: css_variables(style),
        classes: UtilityClasses {
            root: brand_classes(style, theme),
            button_primary: button_classes(style, ButtonVariant::Primary),
            button_secondary: button_classes(style, ButtonVariant::Secondary),
            card: card_classes(style),
            hover: hover_classes(style),
            motion: format!("animate-{}", motion.name),
        },
        motion,
    }
}

/// Flat ordered CSS custom properties for a style.
///
/// # Examples
///
/// ```
/// use tradeforge::registry::StyleRegistry;
/// use tradeforge::theme::css_variables;
///
/// let registry = StyleRegistry::load_defaults().unwrap();
/// let vars = css_variables(registry.resolve("plumber"));
/// let radius = vars.iter().find(|v| v.name == "--brand-radius").unwrap();
/// assert!(radius.value.ends_with("px"));
/// ```
pub fn css_variables(style: &BrandStyle) -> Vec<CssVar> {
    let p = &style.color_palette;
    let t = &style.typography;
    let s = &style.spacing;

    let pairs: Vec<(&str, String)> = vec![
        ("--brand-primary", p.primary.to_hex()),
        ("--brand-primary-hsl", p.primary.to_hsl().to_string()),
        ("--brand-secondary", p.secondary.to_hex()),
        ("--brand-secondary-hsl", p.secondary.to_hsl().to_string()),
        ("--brand-accent", p.accent.to_hex()),
        ("--brand-accent-hsl", p.accent.to_hsl().to_string()),
        ("--brand-bg", p.background.to_hex()),
        ("--brand-surface", p.surface.to_hex()),
        ("--brand-text", p.text.to_hex()),
        ("--brand-muted", p.muted.to_hex()),
        ("--brand-font", t.font_family.clone()),
        ("--brand-heading-weight", t.heading_weight.to_string()),
        ("--brand-body-weight", t.body_weight.to_string()),
        ("--brand-letter-spacing", t.letter_spacing.clone()),
        ("--brand-heading-transform", t.heading_transform.clone()),
        ("--brand-lh-heading", t.line_height_heading.to_string()),
        ("--brand-lh-body", t.line_height_body.to_string()),
        ("--brand-radius", format!("{}px", style.layout.border_radius)),
        ("--brand-container", style.layout.container_width.clone()),
        ("--brand-section-py-mobile", s.section_padding_mobile.clone()),
        ("--brand-section-py", s.section_padding_desktop.clone()),
        ("--brand-card-p", s.card_padding.clone()),
        ("--brand-gap-sm", s.gap_small.clone()),
        ("--brand-gap-md", s.gap_medium.clone()),
        ("--brand-gap-lg", s.gap_large.clone()),
        ("--brand-image-radius", style.imagery.border_radius.clone()),
        ("--brand-hover-scale", style.motion.hover_scale.to_string()),
        ("--brand-duration", format!("{}s", style.motion.animation_duration)),
    ];

    pairs
        .into_iter()
        .map(|(name, value)| CssVar {
            name: name.to_string(),
            value,
        })
        .collect()
}

/// Root wrapper classes.
pub fn brand_classes(style: &BrandStyle, theme: &str) -> String {
    format!("brand-{} theme-{theme}", style.slug)
}

/// Button shape class. `sharp` maps to square corners.
pub fn shape_class(shape: &str) -> &'static str {
    match shape {
        "rounded-xl" => "rounded-xl",
        "rounded-full" => "rounded-full",
        "sharp" => "rounded-none",
        _ => "rounded-lg",
    }
}

/// Button size class.
pub fn size_class(size: &str) -> &'static str {
    match size {
        "small" => "btn-sm",
        "large" => "btn-lg",
        "xlarge" => "btn-xl",
        _ => "btn-md",
    }
}

/// Card radius class for a pixel radius.
pub fn radius_class(radius: u32) -> &'static str {
    match radius {
        0 => "rounded-none",
        4 => "rounded",
        8 => "rounded-lg",
        16 => "rounded-2xl",
        24 => "rounded-3xl",
        _ => "rounded-xl",
    }
}

/// Shadow class for a depth name; `none` and unknown names have no class.
pub fn shadow_class(depth: &str) -> Option<&'static str> {
    match depth {
        "sm" => Some("shadow-sm"),
        "md" => Some("shadow-md"),
        "lg" => Some("shadow-lg"),
        "xl" => Some("shadow-xl"),
        "2xl" => Some("shadow-2xl"),
        _ => None,
    }
}

/// Button classes for a variant.
pub fn button_classes(style: &BrandStyle, variant: ButtonVariant) -> String {
    let cta = &style.cta_style;
    let shape = shape_class(&cta.button_shape);
    let size = size_class(&cta.button_size);

    let parts: Vec<&str> = match variant {
        ButtonVariant::Primary if cta.primary_style == "gradient" => {
            vec!["btn", shape, size, "btn-gradient"]
        }
        ButtonVariant::Primary => vec!["btn", shape, size, "btn-solid"],
        ButtonVariant::Secondary => match cta.secondary_style.as_str() {
            "ghost" => vec!["btn", shape, size, "btn-ghost"],
            // Text links have no shape
            "text-underline" => vec!["btn", size, "btn-link"],
            "outline-soft" => vec!["btn", shape, size, "btn-outline-soft"],
            _ => vec!["btn", shape, size, "btn-outline"],
        },
    };
    parts.join(" ")
}

/// Card classes.
pub fn card_classes(style: &BrandStyle) -> String {
    let mut parts = vec!["card", radius_class(style.layout.border_radius)];
    if let Some(shadow) = shadow_class(&style.components.card_shadow) {
        parts.push(shadow);
    }
    if style.components.card_border {
        parts.push("card-border");
    }
    parts.join(" ")
}

/// Hover classes.
#[allow(clippy::float_cmp)]
pub fn hover_classes(style: &BrandStyle) -> String {
    let mut parts = vec!["hover-transition"];
    if style.motion.hover_scale != 1.0 {
        parts.push("hover-scale");
    }
    if style.motion.hover_shadow {
        parts.push("hover-shadow");
    }
    parts.join(" ")
}

/// Entrance animation for a style; unknown names fall back to `fade-up`.
pub fn motion_variant(style: &BrandStyle) -> MotionVariant {
    let (name, from_opacity, from_x, from_y, from_scale) = match style.motion.scroll_animation.as_str() {
        "fade" => ("fade", 0.0, 0, 0, 1.0),
        "slide-in" => ("slide-in", 0.0, -50, 0, 1.0),
        "scale-fade" => ("scale-fade", 0.0, 0, 0, 0.95),
        _ => ("fade-up", 0.0, 0, 30, 1.0),
    };
    MotionVariant {
        name,
        from_opacity,
        from_x,
        from_y,
        from_scale,
        duration: style.motion.animation_duration,
        stagger: style.motion.stagger_delay,
    }
}

/// Renders variables as a CSS declaration list (`--a: 1; --b: 2;`).
pub fn declarations(variables: &[CssVar]) -> String {
    variables
        .iter()
        .map(|v| format!("{}: {};", v.name, v.value))
        .collect::<Vec<_>>()
        .join(" ")
}
