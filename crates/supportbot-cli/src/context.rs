//! Wiring of config, paths and the durable store for one invocation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use supportbot_core::config::SupportConfig;
use supportbot_core::repository::SupportRepository;
use supportbot_infrastructure::paths::default_config_file;
use supportbot_infrastructure::storage::{ConfigStorage, FileKeyValueStore};
use supportbot_infrastructure::{KeyValueSupportRepository, SupportPaths};

pub struct AppContext {
    pub config: SupportConfig,
    pub paths: SupportPaths,
    pub repository: Arc<dyn SupportRepository>,
}

impl AppContext {
    /// Loads (or creates) the config and opens the file-backed store.
    ///
    /// `data_dir` takes precedence over `[storage] data_dir` in the config.
    pub fn load(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => default_config_file()?,
        };
        let config = ConfigStorage::new(config_path.clone())
            .load_or_init()
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let paths = SupportPaths::resolve(data_dir.or_else(|| config.storage.data_dir.clone()))?;
        let store = FileKeyValueStore::new(paths.store_dir());
        let repository: Arc<dyn SupportRepository> =
            Arc::new(KeyValueSupportRepository::new(store));

        Ok(Self {
            config,
            paths,
            repository,
        })
    }
}
