//! Brand profile commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::BrandProfile;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Work with analysis profiles
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Profile subcommand
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    /// Validate an analysis JSON file before generation
    Validate(ValidateProfileArgs),
}

/// Validate an analysis JSON file before generation
#[derive(Debug, Clone, Args)]
pub struct ValidateProfileArgs {
    /// Path to the analysis JSON (JSON5 accepted)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ValidateProfileResponse {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
    errors: Vec<crate::models::FieldError>,
}

impl ProfileArgs {
    /// Execute the profile command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ProfileCommand::Validate(args) => args.execute(),
        }
    }
}

impl ValidateProfileArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let text = fs::read_to_string(&self.file).map_err(|e| {
            CliError::io(format!("Failed to read {}: {e}", self.file.display()))
        })?;
        let raw: Value = serde_json::from_str(&text)
            .or_else(|_| json5::from_str(&text))
            .map_err(|e| CliError::validation(format!("Not valid JSON: {e}")))?;

        let response = match BrandProfile::from_value(&raw) {
            Ok(profile) => ValidateProfileResponse {
                valid: true,
                hash: Some(profile.content_hash()),
                slug: Some(profile.slug),
                errors: Vec::new(),
            },
            Err(errors) => ValidateProfileResponse {
                valid: false,
                slug: None,
                hash: None,
                errors: errors.errors().to_vec(),
            },
        };

        if self.json {
            print_json(&response)?;
        } else if let Some(slug) = &response.slug {
            println!("✓ Profile is valid (slug: {slug})");
        } else {
            println!("✗ Profile is invalid:");
            for error in &response.errors {
                println!("  {}: {}", error.field, error.message);
            }
        }

        if response.valid {
            Ok(())
        } else {
            Err(CliError::validation("Profile validation failed"))
        }
    }
}
