pub mod kv_support_repository;
pub mod paths;
pub mod storage;

pub use crate::kv_support_repository::KeyValueSupportRepository;
pub use crate::paths::SupportPaths;
