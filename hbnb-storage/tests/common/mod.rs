//! Shared test helpers for storage tests.

#![allow(dead_code)]

use hbnb_storage::{FileStorage, ReloadPolicy, StorageConfig};
use std::path::PathBuf;
use tempfile::TempDir;

/// A storage engine over a backing file inside a fresh temp dir.
/// Keep the `TempDir` alive for as long as the file is needed.
pub fn temp_storage() -> (TempDir, FileStorage) {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(StorageConfig::at(dir.path().join("file.json")));
    (dir, storage)
}

/// A second engine over the same backing file, as a restarted process would
/// see it. Does not reload.
pub fn sibling(storage: &FileStorage) -> FileStorage {
    FileStorage::new(storage.config().clone())
}

/// Config for a path with the given reload policy.
pub fn config_with_policy(path: PathBuf, policy: ReloadPolicy) -> StorageConfig {
    StorageConfig {
        reload_policy: policy,
        ..StorageConfig::at(path)
    }
}
