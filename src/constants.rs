//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and version information.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Tradeforge";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "tradeforge";

/// The binary name of the web server.
pub const WEB_BINARY_NAME: &str = "tradeforge-web";

/// Crate version reported by `/health` and `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
