//! Data models for brand styles, trade content, blueprints and analysis profiles.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are independent of storage, rendering and transport.

pub mod analysis;
pub mod blueprint;
pub mod brand_style;
pub mod content;
pub mod identity;
pub mod rgb;
pub mod trade;
pub mod validation;

// Re-export all model types
pub use analysis::{BrandProfile, ProfilePalette};
pub use blueprint::{Blueprint, ContentRules, MediaStyle};
pub use brand_style::{
    BoldOverrides, BrandStyle, ColorPalette, Components, CtaStyle, IconStyle, Imagery,
    LayoutStyle, LuxuryOverrides, LuxuryPalette, Media, Motion, Spacing, ThemeOverrides,
    Typography,
};
pub use content::{
    AboutContent, ContactInfo, ContentRecord, Faq, HeroContent, SeoInfo, ServiceItem, Testimonial,
};
pub use identity::{CtaKind, CtaOptions, IdentityPalette, TradeIdentity};
pub use rgb::{hex_to_hsl, Hsl, RgbColor};
pub use trade::{NewTrade, Trade};
pub use validation::{FieldError, ValidationErrors};
