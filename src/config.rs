//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILSTASH_CONFIG` (environment variable)
//! 2. `~/.config/mailstash/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailstash\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StashError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Archive directory layout.
    pub archive: ArchiveConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
}

/// Archive directory layout.
///
/// Any directory left unset resolves beneath the archive root, which
/// itself defaults to `{data_dir}/mailstash`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Root directory for the whole archive.
    pub root: Option<PathBuf>,
    /// Directory for raw `.eml` files.
    pub raw_dir: Option<PathBuf>,
    /// Directory for cleaned `.txt` documents.
    pub clean_dir: Option<PathBuf>,
    /// Directory for extracted attachments.
    pub attachments_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            cache_dir: None,
        }
    }
}

/// The three resolved archive directories, passed explicitly into every
/// core call.
#[derive(Debug, Clone)]
pub struct ArchiveDirs {
    /// Raw `.eml` files as downloaded.
    pub raw_dir: PathBuf,
    /// Cleaned `.txt` documents.
    pub clean_dir: PathBuf,
    /// Extracted attachments.
    pub attachments_dir: PathBuf,
}

impl ArchiveDirs {
    /// Resolve the archive directories from configuration.
    ///
    /// Explicitly configured paths win; anything unset lands beneath the
    /// archive root as `raw_emails/`, `cleaned_emails/`, `attachments/`.
    pub fn from_config(cfg: &ArchiveConfig) -> Self {
        let root = cfg.root.clone().unwrap_or_else(default_root);
        Self {
            raw_dir: cfg
                .raw_dir
                .clone()
                .unwrap_or_else(|| root.join("raw_emails")),
            clean_dir: cfg
                .clean_dir
                .clone()
                .unwrap_or_else(|| root.join("cleaned_emails")),
            attachments_dir: cfg
                .attachments_dir
                .clone()
                .unwrap_or_else(|| root.join("attachments")),
        }
    }

    /// Create all three directories if missing.
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.raw_dir, &self.clean_dir, &self.attachments_dir] {
            std::fs::create_dir_all(dir).map_err(|e| StashError::io(dir, e))?;
        }
        Ok(())
    }
}

/// Default archive root: `{data_dir}/mailstash`.
fn default_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailstash")
}

// ── Load ────────────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("MAILSTASH_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("mailstash").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailstash")
}
