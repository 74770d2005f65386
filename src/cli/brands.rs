//! Brand style commands.
//!
//! Lists the registry and shows a resolved record with its CSS variables.

use crate::cli::common::{print_json, resolve_paths, CliError, CliResult};
use crate::registry::StyleRegistry;
use crate::theme::css_variables;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Inspect brand styles
#[derive(Debug, Clone, Args)]
pub struct BrandsArgs {
    /// Brands subcommand
    #[command(subcommand)]
    pub command: BrandsCommand,
}

/// Brand style subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum BrandsCommand {
    /// List every style in the registry
    List(ListBrandsArgs),
    /// Show one resolved style
    Show(ShowBrandArgs),
}

/// List every style in the registry
#[derive(Debug, Clone, Args)]
pub struct ListBrandsArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show one resolved style
#[derive(Debug, Clone, Args)]
pub struct ShowBrandArgs {
    /// Trade slug (unknown slugs show the default style)
    pub slug: String,

    /// Print CSS custom properties instead of the record
    #[arg(long)]
    pub css: bool,
}

// JSON response types
#[derive(Debug, Serialize)]
struct BrandItem {
    slug: String,
    name: String,
    primary: String,
    font: String,
}

#[derive(Debug, Serialize)]
struct ListBrandsResponse {
    brands: Vec<BrandItem>,
    count: usize,
}

impl BrandsArgs {
    /// Execute the brands command
    pub fn execute(&self, data_dir: Option<&PathBuf>) -> CliResult<()> {
        let paths = resolve_paths(data_dir)?;
        let registry = StyleRegistry::load(Some(&paths.styles_dir()))
            .map_err(|e| CliError::io(format!("Failed to load styles: {e:#}")))?;

        match &self.command {
            BrandsCommand::List(args) => args.execute(&registry),
            BrandsCommand::Show(args) => args.execute(&registry),
        }
    }
}

impl ListBrandsArgs {
    /// Execute the list command
    pub fn execute(&self, registry: &StyleRegistry) -> CliResult<()> {
        let brands: Vec<BrandItem> = registry
            .records()
            .map(|style| BrandItem {
                slug: style.slug.clone(),
                name: style.name.clone(),
                primary: style.color_palette.primary.to_hex(),
                font: style.typography.font_family.clone(),
            })
            .collect();
        let response = ListBrandsResponse {
            count: brands.len(),
            brands,
        };

        if self.json {
            return print_json(&response);
        }

        println!("Brand styles ({}):", response.count);
        println!();
        for brand in response.brands {
            println!(
                "  {:<20} {:<24} {}  {}",
                brand.slug, brand.name, brand.primary, brand.font
            );
        }
        Ok(())
    }
}

impl ShowBrandArgs {
    /// Execute the show command
    pub fn execute(&self, registry: &StyleRegistry) -> CliResult<()> {
        if !registry.contains(&self.slug) {
            eprintln!("No style for '{}', showing the default", self.slug);
        }
        let style = registry.resolve(&self.slug);

        if self.css {
            println!(":root {{");
            for var in css_variables(style) {
                println!("  {}: {};", var.name, var.value);
            }
            println!("}}");
            return Ok(());
        }

        print_json(style)
    }
}
