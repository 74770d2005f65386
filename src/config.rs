//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::render::Theme;
use crate::store::DB_FILE;

/// Environment variable overriding `analysis.llm_base_url`.
pub const LLM_BASE_URL_ENV: &str = "TRADEFORGE_LLM_BASE_URL";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Root of all persisted data (styles, identities, blueprints, database)
    pub data_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join("tradeforge"))
            .unwrap_or_else(|| PathBuf::from(".tradeforge"));
        Self { data_dir }
    }
}

impl PathConfig {
    /// Creates a path config rooted at `data_dir`.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Generated style records (`styles/{slug}.json`).
    pub fn styles_dir(&self) -> PathBuf {
        self.data_dir.join("styles")
    }

    /// Trade identity records (`trades/{slug}.json`).
    pub fn trades_dir(&self) -> PathBuf {
        self.data_dir.join("trades")
    }

    /// Blueprints (`blueprints/{slug}_{A|B|C}.json`).
    pub fn blueprints_dir(&self) -> PathBuf {
        self.data_dir.join("blueprints")
    }

    /// SQLite database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// Creates the data directory tree.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.styles_dir(), self.trades_dir(), self.blueprints_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Brand analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// DevTools WebSocket endpoint of a headless Chromium; plain HTTP capture when unset
    pub browser_endpoint: Option<String>,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Base URL of the OpenAI-compatible API
    pub llm_base_url: String,
    /// Chat model name
    pub llm_model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Maximum number of HTML characters sent to the model
    pub max_html_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            browser_endpoint: None,
            navigation_timeout_secs: 30,
            llm_base_url: "https://api.openai.com/v1".to_string(),
            llm_model: "gpt-4o".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_html_chars: 10_000,
        }
    }
}

impl AnalysisConfig {
    /// Base URL with the environment override applied.
    pub fn effective_base_url(&self) -> String {
        env::var(LLM_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.llm_base_url.clone())
    }

    /// API key read from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Theme used when a preview request names none
    pub default_theme: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            default_theme: Theme::Clean.id().to_string(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/tradeforge/config.toml`
/// - macOS: `~/Library/Application Support/tradeforge/config.toml`
/// - Windows: `%APPDATA%\tradeforge\config.toml`
///
/// # Validation
///
/// - `navigation_timeout_secs` must be between 1 and 300
/// - `max_html_chars` must be positive
/// - `llm_base_url` must be an http(s) URL
/// - `default_theme` must name a known theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Brand analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("tradeforge");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the platform config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, returning defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the platform config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp config file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp config file to: {}", path.display()))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if !(1..=300).contains(&analysis.navigation_timeout_secs) {
            bail!(
                "analysis.navigation_timeout_secs must be between 1 and 300, got {}",
                analysis.navigation_timeout_secs
            );
        }
        if analysis.max_html_chars == 0 {
            bail!("analysis.max_html_chars must be positive");
        }
        if !(analysis.llm_base_url.starts_with("http://")
            || analysis.llm_base_url.starts_with("https://"))
        {
            bail!(
                "analysis.llm_base_url must be an http(s) URL, got '{}'",
                analysis.llm_base_url
            );
        }
        if analysis.llm_model.trim().is_empty() {
            bail!("analysis.llm_model must not be empty");
        }
        if Theme::from_id(&self.server.default_theme).is_none() {
            bail!(
                "server.default_theme must be clean, bold or luxury, got '{}'",
                self.server.default_theme
            );
        }
        Ok(())
    }

    /// Default preview theme.
    pub fn default_theme(&self) -> Theme {
        Theme::from_id(&self.server.default_theme).unwrap_or(Theme::Clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.analysis.navigation_timeout_secs, 30);
        assert_eq!(config.analysis.max_html_chars, 10_000);
        assert_eq!(config.default_theme(), Theme::Clean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.analysis.navigation_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.analysis.llm_base_url = "ftp://models".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.server.default_theme = "retro".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.paths = PathConfig::at(temp_dir.path().join("data"));
        config.analysis.browser_endpoint = Some("ws://127.0.0.1:9222/devtools/browser/x".to_string());
        config.server.default_theme = "luxury".to_string();
        config.save_to(&path).unwrap();

        assert!(!path.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.default_theme(), Theme::Luxury);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::new());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[analysis]\nllm_model = \"local-llama\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.analysis.llm_model, "local-llama");
        assert_eq!(loaded.analysis.navigation_timeout_secs, 30);
    }

    #[test]
    fn test_data_layout() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PathConfig::at(temp_dir.path());
        paths.ensure_dirs().unwrap();
        assert!(paths.styles_dir().is_dir());
        assert!(paths.trades_dir().is_dir());
        assert!(paths.blueprints_dir().is_dir());
        assert_eq!(paths.db_path(), temp_dir.path().join("tradeforge.db"));
    }
}
