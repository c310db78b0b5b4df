//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-snippets.toml` in current directory
//! 4. `~/.config/sql-snippets/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [rules]
//! disabled = ["STYLE001", "PERF005"]
//!
//! [store]
//! tags_path = "~/.local/share/sql-snippets/tags.json"
//!
//! [export]
//! output_dir = "backups"
//! default_format = "sql"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_SNIPPETS_TAGS` | Path of the JSON tag store |
//! | `SQL_SNIPPETS_OUTPUT_DIR` | Directory for export files |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    error::{AppResult, config_error},
    exchange::ExportFormat
};

const LOCAL_CONFIG: &str = ".sql-snippets.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules:  RulesConfig,
    #[serde(default)]
    pub store:  StoreConfig,
    #[serde(default)]
    pub export: ExportConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>
}

/// Tag store configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// JSON file backing the tag store; in-memory store when unset
    pub tags_path: Option<PathBuf>
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir:     PathBuf,
    pub default_format: ExportFormat
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir:     PathBuf::from("."),
            default_format: ExportFormat::Json
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-snippets.toml)
    /// 3. Config file in home directory (~/.config/sql-snippets/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-snippets")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Local config replaces the home config entirely
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env();
        Ok(config)
    }

    /// Parse a single TOML config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    fn apply_env(&mut self) {
        if let Some(path) = env::var_os("SQL_SNIPPETS_TAGS") {
            tracing::debug!("tag store path taken from SQL_SNIPPETS_TAGS");
            self.store.tags_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = env::var_os("SQL_SNIPPETS_OUTPUT_DIR") {
            tracing::debug!("export directory taken from SQL_SNIPPETS_OUTPUT_DIR");
            self.export.output_dir = PathBuf::from(dir);
        }
    }
}
