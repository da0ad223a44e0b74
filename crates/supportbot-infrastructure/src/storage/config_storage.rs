//! `config.toml` storage.

use std::path::{Path, PathBuf};

use supportbot_core::SupportError;
use supportbot_core::config::SupportConfig;

use super::atomic_file::{AtomicFile, AtomicFileError};

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O or locking error.
    FileError(AtomicFileError),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::FileError(e) => write!(f, "{}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigStorageError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<AtomicFileError> for ConfigStorageError {
    fn from(e: AtomicFileError) -> Self {
        ConfigStorageError::FileError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

impl From<toml::ser::Error> for ConfigStorageError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigStorageError::TomlSerError(e)
    }
}

impl From<ConfigStorageError> for SupportError {
    fn from(e: ConfigStorageError) -> Self {
        SupportError::config(e.to_string())
    }
}

/// Reads and writes [`SupportConfig`] as TOML.
pub struct ConfigStorage {
    file: AtomicFile,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the config. A missing or empty file yields `None`.
    pub fn load(&self) -> Result<Option<SupportConfig>, ConfigStorageError> {
        match self.file.read()? {
            Some(content) if !content.trim().is_empty() => Ok(Some(toml::from_str(&content)?)),
            _ => Ok(None),
        }
    }

    pub fn save(&self, config: &SupportConfig) -> Result<(), ConfigStorageError> {
        let content = toml::to_string_pretty(config)?;
        self.file.write(&content)?;
        Ok(())
    }

    /// Loads the config, writing the defaults first if the file is missing.
    pub fn load_or_init(&self) -> Result<SupportConfig, ConfigStorageError> {
        if let Some(config) = self.load()? {
            return Ok(config);
        }

        let config = SupportConfig::default();
        self.save(&config)?;
        tracing::info!(
            "[Config] Created default config at {}",
            self.path().display()
        );
        Ok(config)
    }
}
