//! Error types for the entity model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while resolving types or building entities.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Type name is not registered.
    #[error("class doesn't exist: {0}")]
    UnknownType(String),

    /// Registry key is not of the form `<TypeName>.<id>`.
    #[error("invalid registry key: {0}")]
    InvalidKey(String),

    /// `created_at`/`updated_at` could not be parsed.
    #[error("invalid timestamp for {field}: {source}")]
    InvalidTimestamp {
        field: &'static str,
        #[source]
        source: hbnb_types::Error,
    },

    /// Attribute value has the wrong shape.
    #[error("invalid value for attribute {name}: {reason}")]
    InvalidAttribute { name: String, reason: String },

    /// Attribute values are scalars or lists; records are flat.
    #[error("nested objects are not supported as attribute values")]
    NestedObject,

    /// Identity and type-tag attributes cannot be written directly.
    #[error("attribute {0} cannot be updated")]
    ReadOnlyAttribute(String),
}
