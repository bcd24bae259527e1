//! Configuration module for ratfind.
//!
//! Handles loading and parsing the .ratfindrc configuration file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::history::JsonSettingsStore;
use crate::logging::LogConfig;
use crate::search::SearchCriteria;

/// Default .ratfindrc file content with all settings documented.
const DEFAULT_RATFINDRC: &str = r#"# Ratfind Configuration File
# ===========================
# This file is read when a find/replace session starts.
# Lines starting with '#' are comments.
#
# History
# -------
# Where recent searches are kept (the last 10, most recent first).
# history_file = ~/.ratfind/find_history.json

# Default Search Options
# ----------------------
# Used when there is no saved history yet.
# use_regex = true          # Interpret find text as a regular expression
# case_sensitive = false    # Match case exactly
# selection_only = false    # Restrict matching to the current selection

# Logging Configuration
# ---------------------
# Logs are stored in ~/.ratfind/logs/ with automatic cleanup.
#
# log_enabled = true       # Enable/disable file logging (true/false)
# log_level = info         # Log level: trace, debug, info, warn, error, off
# log_retention = 24       # Hours to keep log files (default: 24)
"#;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the persisted search history.
    pub history_path: PathBuf,
    /// Criteria used when history is empty.
    pub default_criteria: SearchCriteria,
    /// Path to config file.
    pub config_path: PathBuf,
    /// Logging configuration.
    pub log_config: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: JsonSettingsStore::default_path(),
            default_criteria: SearchCriteria::default(),
            config_path: Self::default_config_path(),
            log_config: LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default config file path (~/.ratfindrc).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ratfindrc")
    }

    /// Loads configuration from the default path, creating it if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if config cannot be read.
    pub fn load() -> io::Result<Self> {
        let path = Self::default_config_path();
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    ///
    /// # Errors
    /// Returns error if config cannot be read.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self {
            config_path: path.to_path_buf(),
            ..Self::default()
        };
        config.parse(&content);
        Ok(config)
    }

    /// Creates the default config file.
    fn create_default_config(path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_RATFINDRC.as_bytes())?;
        Ok(())
    }

    /// Parses the config file content.
    pub fn parse(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Remove inline comments
                let value = value.split('#').next().unwrap_or(value).trim();

                self.apply_setting(key, value);
            }
        }
    }

    /// Applies a single setting. Unknown keys are ignored.
    fn apply_setting(&mut self, key: &str, value: &str) {
        match key {
            "history_file" | "history_path" => {
                if !value.is_empty() {
                    self.history_path = expand_home(value);
                }
            }
            "use_regex" => self.default_criteria.is_regex = parse_bool(value),
            "case_sensitive" => self.default_criteria.case_sensitive = parse_bool(value),
            "selection_only" => self.default_criteria.selection_only = parse_bool(value),
            "log_level" => {
                self.log_config.level = LogConfig::parse_level(value);
            }
            "log_retention" | "log_retention_hours" => {
                self.log_config.retention_hours = LogConfig::parse_retention(value);
            }
            "log_enabled" | "logging" => {
                self.log_config.enabled = parse_bool(value);
            }
            _ => {
                tracing::debug!(key, "ignoring unknown config key");
            }
        }
    }

    /// Returns a history store at the configured path.
    #[must_use]
    pub fn history_store(&self) -> JsonSettingsStore {
        JsonSettingsStore::with_path(self.history_path.clone())
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "1" | "on")
}

/// Expands a leading `~/` to the home directory.
fn expand_home(value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(value),
    }
}
