//! Path resolution for supportbot files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/supportbot/            # Config directory
//! └── config.toml                  # Application configuration
//!
//! ~/.local/share/supportbot/       # Data directory (overridable)
//! ├── store/                       # One JSON file per record
//! │   ├── chatbot_products.json
//! │   ├── chatbot_issues.json
//! │   └── chatbot_tickets.json
//! └── logs/
//!     └── supportbot.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "supportbot";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform config or data directory could be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Returns the default path of `config.toml`.
pub fn default_config_file() -> Result<PathBuf, PathError> {
    let config_dir = dirs::config_dir().ok_or(PathError::HomeDirNotFound)?;
    Ok(config_dir.join(APP_DIR).join("config.toml"))
}

/// Resolved data locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportPaths {
    data_dir: PathBuf,
}

impl SupportPaths {
    /// Uses `data_dir` if given, otherwise the platform data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self, PathError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(APP_DIR),
        };
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory of the key-value store files.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir() {
        let paths = SupportPaths::resolve(Some(PathBuf::from("/tmp/sb"))).unwrap();
        assert_eq!(paths.data_dir(), Path::new("/tmp/sb"));
        assert_eq!(paths.store_dir(), PathBuf::from("/tmp/sb/store"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/sb/logs"));
    }

    #[test]
    fn test_default_config_file_name() {
        if let Ok(path) = default_config_file() {
            assert!(path.ends_with("supportbot/config.toml"));
        }
    }
}
