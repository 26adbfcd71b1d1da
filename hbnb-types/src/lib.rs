//! Core type definitions for the HBnB object registry.
//!
//! This crate defines the fundamental, schema-agnostic types used throughout
//! the engine:
//! - Entity identifiers (128-bit random UUID v4, carried as strings)
//! - Microsecond-precision timestamps with an ISO-8601 wire form
//!
//! Entity attributes, schemas and the type registry live in `hbnb-model`.

mod ids;
mod timestamp;

pub use ids::EntityId;
pub use timestamp::{TIMESTAMP_FORMAT, Timestamp};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
