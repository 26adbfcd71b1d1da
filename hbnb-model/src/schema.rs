use crate::entity::Entity;
use crate::{AttrValue, ModelResult, Record};

/// Describes an entity type: its name and the attributes it declares.
///
/// A schema doubles as the factory for its type. [`EntitySchema::instantiate`]
/// builds a fresh entity and [`EntitySchema::reconstruct`] rehydrates one
/// from a persisted [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    pub entity_type: String,
    pub fields: Vec<DeclaredField>,
}

/// An attribute declared by a type, with the value a fresh instance starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredField {
    pub name: String,
    pub default: AttrValue,
}

impl DeclaredField {
    fn simple(name: &str, default: AttrValue) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    /// Shorthand for a string attribute defaulting to `""`.
    pub fn text(name: &str) -> Self {
        Self::simple(name, AttrValue::Str(String::new()))
    }

    /// Shorthand for an integer attribute defaulting to `0`.
    pub fn integer(name: &str) -> Self {
        Self::simple(name, AttrValue::Int(0))
    }

    /// Shorthand for a float attribute defaulting to `0.0`.
    pub fn float(name: &str) -> Self {
        Self::simple(name, AttrValue::Float(0.0))
    }

    /// Shorthand for a boolean attribute defaulting to `false`.
    pub fn bool(name: &str) -> Self {
        Self::simple(name, AttrValue::Bool(false))
    }

    /// Shorthand for a list attribute defaulting to `[]`.
    pub fn list(name: &str) -> Self {
        Self::simple(name, AttrValue::List(Vec::new()))
    }
}

impl EntitySchema {
    /// A schema with no declared attributes.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a declared attribute.
    #[must_use]
    pub fn with_field(mut self, field: DeclaredField) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a declared attribute by name.
    pub fn field(&self, name: &str) -> Option<&DeclaredField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The declared attributes with their default values.
    pub fn defaults(&self) -> Record {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }

    /// Builds a fresh entity: new id, `created_at == updated_at == now`.
    ///
    /// The entity is not registered anywhere; the storage engine does that.
    pub fn instantiate(&self) -> Entity {
        Entity::fresh(&self.entity_type, self.defaults())
    }

    /// Rebuilds an entity from its projected form.
    pub fn reconstruct(&self, record: Record) -> ModelResult<Entity> {
        Entity::from_record(&self.entity_type, self.defaults(), record)
    }

    /// Converts free-form text into a value for attribute `name`.
    ///
    /// Declared numeric and boolean attributes keep their type when the text
    /// parses; everything else is stored as a string.
    pub fn coerce(&self, name: &str, raw: &str) -> AttrValue {
        self.field(name)
            .and_then(|f| f.default.coerce_like(raw))
            .unwrap_or_else(|| AttrValue::Str(raw.to_owned()))
    }

    // ── Built-in types ──────────────────────────────────────────

    pub fn base_model() -> Self {
        Self::new("BaseModel")
    }

    pub fn user() -> Self {
        Self::new("User")
            .with_field(DeclaredField::text("email"))
            .with_field(DeclaredField::text("password"))
            .with_field(DeclaredField::text("first_name"))
            .with_field(DeclaredField::text("last_name"))
    }

    pub fn state() -> Self {
        Self::new("State").with_field(DeclaredField::text("name"))
    }

    pub fn city() -> Self {
        Self::new("City")
            .with_field(DeclaredField::text("state_id"))
            .with_field(DeclaredField::text("name"))
    }

    pub fn amenity() -> Self {
        Self::new("Amenity").with_field(DeclaredField::text("name"))
    }

    pub fn place() -> Self {
        Self::new("Place")
            .with_field(DeclaredField::text("city_id"))
            .with_field(DeclaredField::text("user_id"))
            .with_field(DeclaredField::text("name"))
            .with_field(DeclaredField::text("description"))
            .with_field(DeclaredField::integer("number_rooms"))
            .with_field(DeclaredField::integer("number_bathrooms"))
            .with_field(DeclaredField::integer("max_guest"))
            .with_field(DeclaredField::integer("price_by_night"))
            .with_field(DeclaredField::float("latitude"))
            .with_field(DeclaredField::float("longitude"))
            .with_field(DeclaredField::list("amenity_ids"))
    }

    pub fn review() -> Self {
        Self::new("Review")
            .with_field(DeclaredField::text("place_id"))
            .with_field(DeclaredField::text("user_id"))
            .with_field(DeclaredField::text("text"))
    }
}
