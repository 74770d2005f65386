//! Render command: writes one themed page for a trade.

use crate::cli::common::{resolve_paths, CliError, CliResult};
use crate::config::Config;
use crate::registry::StyleRegistry;
use crate::render::{Theme, Viewport};
use crate::services::CatalogService;
use clap::{Args, ValueEnum};
use std::fs;
use std::path::PathBuf;

/// Output format of a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML document
    #[default]
    Html,
    /// Page tree as JSON
    Json,
}

/// Render a trade page with one theme
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Trade slug
    pub slug: String,

    /// Theme id or letter (clean/A, bold/B, luxury/C); defaults to the configured theme
    #[arg(short, long, value_name = "THEME")]
    pub theme: Option<Theme>,

    /// Viewport (mobile, tablet, desktop)
    #[arg(long, value_name = "VIEWPORT", default_value = "desktop")]
    pub viewport: Viewport,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, data_dir: Option<&PathBuf>) -> CliResult<()> {
        let paths = resolve_paths(data_dir)?;
        let theme = match self.theme {
            Some(theme) => theme,
            None => Config::load()
                .map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))?
                .default_theme(),
        };
        let registry = StyleRegistry::load(Some(&paths.styles_dir()))
            .map_err(|e| CliError::io(format!("Failed to load styles: {e:#}")))?;
        let catalog = CatalogService::open(paths)
            .map_err(|e| CliError::io(format!("Failed to open catalog: {e:#}")))?;

        let page = catalog
            .render_page(&registry, &self.slug, theme, self.viewport)
            .map_err(|e| CliError::io(format!("Failed to render page: {e:#}")))?
            .ok_or_else(|| CliError::validation(format!("Trade '{}' not found", self.slug)))?;

        let output = match self.format {
            OutputFormat::Html => page.to_html(),
            OutputFormat::Json => serde_json::to_string_pretty(&page)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?,
        };

        match &self.out {
            Some(path) => {
                fs::write(path, output)
                    .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
                eprintln!("Wrote {} ({theme} theme) to {}", self.slug, path.display());
            }
            None => println!("{output}"),
        }
        Ok(())
    }
}
