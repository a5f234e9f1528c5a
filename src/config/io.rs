//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.quizquest/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quizquest")
    }

    /// Get the global config file path (~/.quizquest/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Default progress database path (~/.quizquest/progress.db)
    pub fn default_database_path() -> PathBuf {
        Self::global_config_dir().join("progress.db")
    }

    /// Database path from settings, or the default location
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }

    /// Load configuration from a file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// Holds an exclusive lock on a sibling `.lock` file while writing to a
    /// temp file that is then renamed over the target.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        let _lock = lock_config(path)?;
        write_atomic(path, &content)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::init_file(path)?;
        }
        Self::from_file(path)
    }

    /// Load global configuration from ~/.quizquest/config.toml
    /// If no config exists, auto-creates one with defaults.
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::global_config_path())
    }

    /// Write a default config to `path` unless another process got there first
    fn init_file(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let _lock = lock_config(path)?;

        // Re-check after acquiring lock (another process may have created it)
        if path.exists() {
            return Ok(());
        }

        let content = toml::to_string_pretty(&Self::default())
            .with_context(|| "Failed to serialize default config")?;
        write_atomic(path, &content)?;

        tracing::info!("Created {}", path.display());
        Ok(())
    }
}

/// Take an exclusive lock next to the config file. Released on drop.
fn lock_config(path: &Path) -> Result<File> {
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    Ok(lock_file)
}

/// Temp file + rename so a crash never leaves a half-written config
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}
