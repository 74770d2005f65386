//! Tradeforge Library
//!
//! This library provides the core functionality behind the Tradeforge CLI
//! and web server: the brand style registry, theme resolution and page
//! rendering, the trade catalog store, brand generation and site analysis.

// Module declarations
pub mod assets;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod registry;
pub mod render;
pub mod services;
pub mod store;
pub mod theme;

#[cfg(feature = "web")]
pub mod analysis;
#[cfg(feature = "web")]
pub mod web;
