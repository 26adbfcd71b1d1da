use std::collections::BTreeMap;

use crate::{EntitySchema, ModelError, ModelResult};

/// Maps type names to their schemas.
///
/// New entity types are added with [`TypeRegistry::register`]; nothing else
/// in the engine needs to change.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    schemas: BTreeMap<String, EntitySchema>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `BaseModel` and its six subtypes.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for schema in [
            EntitySchema::base_model(),
            EntitySchema::user(),
            EntitySchema::state(),
            EntitySchema::city(),
            EntitySchema::amenity(),
            EntitySchema::place(),
            EntitySchema::review(),
        ] {
            registry.register(schema);
        }
        registry
    }

    /// Adds or replaces a schema under its type name.
    pub fn register(&mut self, schema: EntitySchema) {
        self.schemas.insert(schema.entity_type.clone(), schema);
    }

    /// Resolves a type name.
    pub fn get(&self, entity_type: &str) -> ModelResult<&EntitySchema> {
        self.schemas
            .get(entity_type)
            .ok_or_else(|| ModelError::UnknownType(entity_type.to_owned()))
    }

    pub fn contains(&self, entity_type: &str) -> bool {
        self.schemas.contains_key(entity_type)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
