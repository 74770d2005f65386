//! Shared CLI types: exit codes and the command error.

use std::fmt;
use std::path::PathBuf;

use crate::config::{Config, PathConfig};

/// Process exit codes used by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input failed validation
    ValidationError = 1,
    /// I/O, lookup or serialization failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers.
#[derive(Debug)]
pub struct CliError {
    /// Human-readable message printed to stderr
    pub message: String,
    /// Exit code for the process
    pub exit_code: ExitCode,
}

impl CliError {
    /// An I/O or lookup failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }

    /// A validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Data directory for a command: `--data-dir` if given, else the configured one.
pub fn resolve_paths(data_dir: Option<&PathBuf>) -> CliResult<PathConfig> {
    match data_dir {
        Some(dir) => Ok(PathConfig::at(dir)),
        None => Config::load()
            .map(|config| config.paths)
            .map_err(|e| CliError::io(format!("Failed to load config: {e:#}"))),
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
