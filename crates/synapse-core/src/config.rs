//! Configuration management for Synapse.
//!
//! Loads configuration from ${SYNAPSE_HOME}/config.toml with sensible
//! defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chat::DEFAULT_GREETING;

/// Behavior of the stubbed search backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
    /// Seed for the canned reply rotation.
    pub seed: u64,
    /// When true, every search request fails.
    pub fail: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: MockConfig::DEFAULT_LATENCY_MS,
            seed: 0,
            fail: false,
        }
    }
}

impl MockConfig {
    const DEFAULT_LATENCY_MS: u64 = 1500;

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Greeting seeded into every new conversation.
    pub greeting: String,

    /// Stubbed search backend behavior.
    #[serde(default)]
    pub mock: MockConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            mock: MockConfig::default(),
        }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Synapse configuration and data directories.
    //!
    //! SYNAPSE_HOME resolution order:
    //! 1. SYNAPSE_HOME environment variable (if set)
    //! 2. ~/.config/synapse (default)

    use std::path::PathBuf;

    /// Returns the Synapse home directory.
    ///
    /// Checks SYNAPSE_HOME env var first, falls back to ~/.config/synapse
    pub fn synapse_home() -> PathBuf {
        if let Ok(home) = std::env::var("SYNAPSE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("synapse"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        synapse_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn log_dir() -> PathBuf {
        synapse_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.greeting, DEFAULT_GREETING);
        assert_eq!(config.mock.latency_ms, 1500);
        assert_eq!(config.mock.seed, 0);
        assert!(!config.mock.fail);
    }

    #[test]
    fn load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[mock]\nlatency_ms = 10\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.mock.latency_ms, 10);
        assert_eq!(config.greeting, DEFAULT_GREETING);
        assert!(!config.mock.fail);
    }

    #[test]
    fn load_custom_greeting() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "greeting = \"hi there\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.greeting, "hi there");
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "greeting = [not toml").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Synapse Configuration"));
        assert!(contents.contains("latency_ms = 1500"));
    }

    #[test]
    fn init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.greeting, DEFAULT_GREETING);
        assert_eq!(config.mock.latency(), Duration::from_millis(1500));
    }
}
