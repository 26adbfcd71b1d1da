//! JSON file storage engine for the HBnB object registry.
//!
//! Keeps every live entity in memory under its `<TypeName>.<id>` key and
//! serializes the whole collection to a single JSON document on demand.
//!
//! # Architecture
//!
//! - The live collection is owned by one [`FileStorage`] value created at
//!   startup and passed to whoever needs it
//! - [`FileStorage::save`] overwrites the backing file with every entity's
//!   projected record; there is no append or diff
//! - [`FileStorage::reload`] rebuilds typed entities through the
//!   [`hbnb_model::TypeRegistry`]; a missing file is treated as empty
//! - The engine never prints; failures surface as [`StorageError`]

mod config;
mod error;
mod file_storage;

pub use config::{DEFAULT_FILE, ReloadPolicy, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use file_storage::{FileStorage, TypeFilter};
