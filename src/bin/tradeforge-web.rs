//! Tradeforge Web Server Binary
//!
//! This binary starts the Tradeforge REST API: trade catalog, theme
//! previews, site export and brand analysis.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, configured data directory)
//! tradeforge-web
//!
//! # Specify port and data directory
//! tradeforge-web --port 8080 --data-dir ./data
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tradeforge::config::{Config, PathConfig};
use tradeforge::constants::WEB_BINARY_NAME;
use tradeforge::web;

/// Tradeforge Web Server - REST API for the trade catalog
#[derive(Parser, Debug)]
#[command(name = WEB_BINARY_NAME, author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (defaults to the configured port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    host: Option<String>,

    /// Data directory holding styles, trades, blueprints and the database.
    /// Defaults to the configured `paths.data_dir`.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load or create configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e:#}");
        Config::default()
    });

    if let Some(dir) = args.data_dir {
        config.paths = PathConfig::at(dir);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    config.validate()?;

    info!("Data directory: {}", config.paths.data_dir.display());

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Start the server
    web::run_server(config, addr).await
}
