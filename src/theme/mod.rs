//! Theme resolution: style records to CSS tokens, layout variants and
//! section order.

pub mod layout;
pub mod resolver;

pub use layout::{section_order, HeroLayout, SectionKind, ServiceLayout, TestimonialLayout};
pub use resolver::{css_variables, resolve, ButtonVariant, CssVar, ResolvedStyle};
