//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// REPL prompt
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Evaluate closed expressions after type checking
    #[serde(default = "default_true")]
    pub evaluate: bool,

    /// REPL history file, none keeps history in memory only
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Print the type of the whole expression after the variable report
    #[serde(default)]
    pub show_expression_type: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            color: default_true(),
            evaluate: default_true(),
            history_file: None,
            show_expression_type: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(config_path)?;

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config_path: Option<&Path>) -> Result<()> {
        let config_path = Self::resolve_path(config_path)?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// The given path, or the default location when none is given
    pub fn resolve_path(config_path: Option<&Path>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(path.to_owned()),
            None => Self::default_config_path(),
        }
    }

    /// Get default configuration file path
    fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Cannot determine config directory")?;

        Ok(config_dir.join("tiny-lang").join("config.toml"))
    }
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() {
        let config = CliConfig {
            history_file: Some(PathBuf::from("/tmp/tiny_history")),
            ..CliConfig::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: CliConfig = toml::from_str("prompt = \"tiny> \"\ncolor = false\n").unwrap();

        assert_eq!(parsed.prompt, "tiny> ");
        assert!(!parsed.color);
        assert!(parsed.evaluate);
        assert_eq!(parsed.history_file, None);
        assert!(!parsed.show_expression_type);
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = CliConfig {
            evaluate: false,
            show_expression_type: true,
            ..CliConfig::default()
        };
        config.save(Some(&config_path)).unwrap();

        let loaded = CliConfig::load(Some(&config_path)).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = CliConfig::load(Some(&temp_dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded, CliConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "color = \"sometimes\"").unwrap();

        let error = CliConfig::load(Some(&config_path)).unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }
}
