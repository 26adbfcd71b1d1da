//! Core entity model for HBnB.
//!
//! Defines the types every other layer of the registry depends on:
//! - [`Entity`]: identity, timestamps and an open attribute bag
//! - [`AttrValue`] / [`Record`]: the tagged attribute union and the flat
//!   persisted form of an entity
//! - [`EntitySchema`]: declares an entity type's attributes and defaults
//! - [`TypeRegistry`]: resolves type names to schemas (the seven built-in
//!   types plus anything registered at runtime)
//! - [`RegistryKey`]: the `<TypeName>.<id>` handle used in memory and on disk

mod entity;
mod error;
mod key;
mod registry;
mod schema;
mod value;

pub use entity::{Entity, RESERVED_KEYS, TYPE_TAG};
pub use error::{ModelError, ModelResult};
pub use key::RegistryKey;
pub use registry::TypeRegistry;
pub use schema::{DeclaredField, EntitySchema};
pub use value::{AttrValue, Record};
