use hbnb_types::{EntityId, Timestamp};
use std::fmt;

use crate::{AttrValue, ModelError, ModelResult, Record, RegistryKey};

/// Key naming the concrete type in a projected record.
pub const TYPE_TAG: &str = "__class__";

/// Keys that are entity metadata rather than attribute-bag entries.
pub const RESERVED_KEYS: [&str; 4] = ["id", "created_at", "updated_at", TYPE_TAG];

/// A live instance of a registered type.
///
/// Identity and timestamps are fixed fields; everything else (declared
/// attributes and any added later) lives in an open attribute bag.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    entity_type: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    attributes: Record,
}

impl Entity {
    pub(crate) fn fresh(entity_type: &str, attributes: Record) -> Self {
        let now = Timestamp::now();
        Self {
            id: EntityId::new(),
            entity_type: entity_type.to_owned(),
            created_at: now,
            updated_at: now,
            attributes,
        }
    }

    /// Overlays `record` onto `defaults`. The type tag is dropped; missing
    /// identity fields fall back to fresh values.
    pub(crate) fn from_record(
        entity_type: &str,
        defaults: Record,
        record: Record,
    ) -> ModelResult<Self> {
        let mut id = None;
        let mut created_at = None;
        let mut updated_at = None;
        let mut attributes = defaults;

        for (key, value) in record {
            match key.as_str() {
                TYPE_TAG => {}
                "id" => match value {
                    AttrValue::Str(s) => id = Some(EntityId::from(s)),
                    other => {
                        return Err(ModelError::InvalidAttribute {
                            name: key,
                            reason: format!("expected a string, found {other}"),
                        });
                    }
                },
                "created_at" => created_at = Some(parse_timestamp("created_at", &value)?),
                "updated_at" => updated_at = Some(parse_timestamp("updated_at", &value)?),
                _ => {
                    attributes.insert(key, value);
                }
            }
        }

        let now = Timestamp::now();
        Ok(Self {
            id: id.unwrap_or_default(),
            entity_type: entity_type.to_owned(),
            created_at: created_at.unwrap_or(now),
            updated_at: updated_at.unwrap_or(now),
            attributes,
        })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The `<TypeName>.<id>` key this entity is stored under.
    pub fn key(&self) -> RegistryKey {
        RegistryKey::new(self.entity_type.clone(), self.id.clone())
    }

    /// Attribute bag (declared and dynamic attributes, no identity fields).
    pub fn attributes(&self) -> &Record {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Sets an attribute. Identity fields and the type tag are read-only.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> ModelResult<()> {
        let name = name.into();
        if RESERVED_KEYS.contains(&name.as_str()) {
            return Err(ModelError::ReadOnlyAttribute(name));
        }
        self.attributes.insert(name, value.into());
        Ok(())
    }

    /// Refreshes `updated_at`. The new value is strictly greater than the old.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.tick();
    }

    /// Flat, persistence-ready form: every attribute plus `id`, ISO-8601
    /// timestamps and the type tag.
    pub fn project(&self) -> Record {
        let mut record = self.attributes.clone();
        record.insert("id".into(), AttrValue::Str(self.id.to_string()));
        record.insert("created_at".into(), AttrValue::Str(self.created_at.to_iso()));
        record.insert("updated_at".into(), AttrValue::Str(self.updated_at.to_iso()));
        record.insert(TYPE_TAG.into(), AttrValue::Str(self.entity_type.clone()));
        record
    }

    /// Display form: `[<TypeName>] (<id>) {<attributes>}`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {{'id': {}, 'created_at': '{}', 'updated_at': '{}'",
            self.entity_type,
            self.id,
            AttrValue::Str(self.id.to_string()),
            self.created_at,
            self.updated_at,
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", '{name}': {value}")?;
        }
        f.write_str("}")
    }
}

fn parse_timestamp(field: &'static str, value: &AttrValue) -> ModelResult<Timestamp> {
    let raw = value.as_str().ok_or_else(|| ModelError::InvalidTimestamp {
        field,
        source: hbnb_types::Error::InvalidTimestamp(format!("expected a string, found {value}")),
    })?;
    Timestamp::parse(raw).map_err(|source| ModelError::InvalidTimestamp { field, source })
}
