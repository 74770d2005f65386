//! Hex to HSL conversion command.

use crate::cli::common::{CliError, CliResult};
use crate::models::hex_to_hsl;
use clap::Args;

/// Convert a hex color to the CSS "h s% l%" triple
#[derive(Debug, Clone, Args)]
pub struct HslArgs {
    /// Hex color (#RRGGBB)
    #[arg(value_name = "HEX", allow_hyphen_values = true)]
    pub hex: String,
}

impl HslArgs {
    /// Execute the hsl command
    pub fn execute(&self) -> CliResult<()> {
        let hsl = hex_to_hsl(&self.hex).map_err(|e| CliError::validation(e.to_string()))?;
        println!("{hsl}");
        Ok(())
    }
}
