use hbnb_types::EntityId;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{ModelError, ModelResult};

/// The `<TypeName>.<id>` handle for a live or persisted entity.
///
/// Splits on the first `.`, so ids themselves may contain dots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistryKey {
    entity_type: String,
    id: EntityId,
}

impl RegistryKey {
    pub fn new(entity_type: impl Into<String>, id: impl Into<EntityId>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Parses `<TypeName>.<id>`. Both halves must be non-empty.
    pub fn parse(s: &str) -> ModelResult<Self> {
        match s.split_once('.') {
            Some((ty, id)) if !ty.is_empty() && !id.is_empty() => Ok(Self::new(ty, id)),
            _ => Err(ModelError::InvalidKey(s.to_owned())),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity_type, self.id)
    }
}

impl FromStr for RegistryKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RegistryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
