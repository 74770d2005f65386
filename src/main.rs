//! Tradeforge - trade website catalog and brand theming
//!
//! Command-line access to the brand style registry, the theme renderers and
//! analysis profile validation. The REST API lives in `tradeforge-web`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tradeforge::cli::{BrandsArgs, CliError, HslArgs, ProfileArgs, RenderArgs};
use tradeforge::constants::{APP_BINARY_NAME, APP_NAME};

/// Tradeforge - trade website catalog and brand theming
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Data directory (defaults to the configured one)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect brand styles
    Brands(BrandsArgs),
    /// Render a trade page with one theme
    Render(RenderArgs),
    /// Convert a hex color to an HSL triple
    Hsl(HslArgs),
    /// Work with analysis profiles
    Profile(ProfileArgs),
}

fn main() {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_ref();

    let result: Result<(), CliError> = match &cli.command {
        Command::Brands(args) => args.execute(data_dir),
        Command::Render(args) => args.execute(data_dir),
        Command::Hsl(args) => args.execute(),
        Command::Profile(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("{APP_NAME}: {e}");
        std::process::exit(e.exit_code.code());
    }
}
