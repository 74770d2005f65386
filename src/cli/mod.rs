//! CLI command handlers for Tradeforge.
//!
//! This module provides headless, scriptable access to the style registry,
//! the theme renderers and profile validation.

pub mod brands;
pub mod common;
pub mod hsl;
pub mod profile;
pub mod render;

// Re-export types used by main.rs and tests
pub use brands::BrandsArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use hsl::HslArgs;
pub use profile::ProfileArgs;
pub use render::RenderArgs;
