//! Storage layer: atomic files, key-value backends and config storage.

mod atomic_file;
mod config_storage;
mod kv_store;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub use config_storage::{ConfigStorage, ConfigStorageError};
pub use kv_store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StoreError};
