//! The storage engine: live collection plus backing-file persistence.

use hbnb_model::{
    AttrValue, Entity, EntitySchema, ModelError, Record, RegistryKey, TypeRegistry,
};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::{ReloadPolicy, StorageConfig, StorageError, StorageResult};

/// Selects entities by concrete type.
#[derive(Debug, Clone, Copy)]
pub enum TypeFilter<'a> {
    /// Resolved through the type registry; unknown names are an error.
    Name(&'a str),
    /// Already resolved; no registry lookup.
    Schema(&'a EntitySchema),
}

impl<'a> From<&'a str> for TypeFilter<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a EntitySchema> for TypeFilter<'a> {
    fn from(schema: &'a EntitySchema) -> Self {
        Self::Schema(schema)
    }
}

/// In-memory entity registry backed by a JSON file.
pub struct FileStorage {
    config: StorageConfig,
    registry: TypeRegistry,
    objects: BTreeMap<RegistryKey, Entity>,
}

impl FileStorage {
    /// An empty engine over the built-in types. Does not touch the file.
    pub fn new(config: StorageConfig) -> Self {
        Self::with_registry(config, TypeRegistry::builtin())
    }

    /// An empty engine over a custom set of types.
    pub fn with_registry(config: StorageConfig, registry: TypeRegistry) -> Self {
        Self {
            config,
            registry,
            objects: BTreeMap::new(),
        }
    }

    /// Creates an engine over the built-in types and reloads the backing file.
    pub fn open(config: StorageConfig) -> StorageResult<Self> {
        let mut storage = Self::new(config);
        storage.reload()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    // ── Live collection ─────────────────────────────────────────

    /// Inserts an entity under `<TypeName>.<id>`. Re-registering the same
    /// key replaces the previous entry.
    pub fn register(&mut self, entity: Entity) -> RegistryKey {
        let key = entity.key();
        debug!("Registering {}", key);
        self.objects.insert(key.clone(), entity);
        key
    }

    /// Builds a fresh entity of `entity_type` and registers it.
    ///
    /// Nothing is written to disk until [`FileStorage::save`].
    pub fn create(&mut self, entity_type: &str) -> StorageResult<RegistryKey> {
        self.create_with(entity_type, Record::new())
    }

    /// Like [`FileStorage::create`], with initial attribute values.
    pub fn create_with(
        &mut self,
        entity_type: &str,
        attributes: Record,
    ) -> StorageResult<RegistryKey> {
        let mut entity = self.registry.get(entity_type)?.instantiate();
        for (name, value) in attributes {
            entity.set_attribute(name, value)?;
        }
        Ok(self.register(entity))
    }

    /// The full live collection.
    pub fn all(&self) -> &BTreeMap<RegistryKey, Entity> {
        &self.objects
    }

    /// Mutable access to the live collection. Removing an entry here and
    /// then calling [`FileStorage::save`] deletes it.
    pub fn all_mut(&mut self) -> &mut BTreeMap<RegistryKey, Entity> {
        &mut self.objects
    }

    /// Entries whose concrete type matches `filter`.
    pub fn filter<'f>(
        &self,
        filter: impl Into<TypeFilter<'f>>,
    ) -> StorageResult<BTreeMap<&RegistryKey, &Entity>> {
        let entity_type = match filter.into() {
            TypeFilter::Name(name) => self.registry.get(name)?.entity_type.as_str(),
            TypeFilter::Schema(schema) => schema.entity_type.as_str(),
        };
        Ok(self
            .objects
            .iter()
            .filter(|(_, e)| e.entity_type() == entity_type)
            .collect())
    }

    /// Number of entries whose concrete type matches `filter`.
    pub fn count<'f>(&self, filter: impl Into<TypeFilter<'f>>) -> StorageResult<usize> {
        Ok(self.filter(filter)?.len())
    }

    pub fn get(&self, key: &RegistryKey) -> Option<&Entity> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: &RegistryKey) -> Option<&mut Entity> {
        self.objects.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ── Mutations that persist ──────────────────────────────────

    /// Refreshes the entity's `updated_at` and saves the whole collection.
    /// Returns `false` (and writes nothing) when the key is absent.
    pub fn touch(&mut self, key: &RegistryKey) -> StorageResult<bool> {
        let Some(entity) = self.objects.get_mut(key) else {
            return Ok(false);
        };
        entity.touch();
        self.save()?;
        Ok(true)
    }

    /// Sets one attribute, then touches and saves.
    pub fn update(
        &mut self,
        key: &RegistryKey,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> StorageResult<bool> {
        let Some(entity) = self.objects.get_mut(key) else {
            return Ok(false);
        };
        entity.set_attribute(name, value)?;
        self.touch(key)
    }

    /// Sets several attributes at once, then touches and saves. Either all
    /// are applied or none are.
    pub fn update_many(&mut self, key: &RegistryKey, attributes: Record) -> StorageResult<bool> {
        let Some(entity) = self.objects.get_mut(key) else {
            return Ok(false);
        };
        let mut updated = entity.clone();
        for (name, value) in attributes {
            updated.set_attribute(name, value)?;
        }
        *entity = updated;
        self.touch(key)
    }

    /// Like [`FileStorage::update`], converting `raw` to the declared type
    /// of the attribute when there is one.
    pub fn update_text(&mut self, key: &RegistryKey, name: &str, raw: &str) -> StorageResult<bool> {
        let value = match self.registry.get(key.entity_type()) {
            Ok(schema) => schema.coerce(name, raw),
            Err(_) => AttrValue::Str(raw.to_owned()),
        };
        self.update(key, name, value)
    }

    /// Removes the entry and saves. Returns the removed entity, or `None`
    /// (and writes nothing) when the key is absent.
    pub fn destroy(&mut self, key: &RegistryKey) -> StorageResult<Option<Entity>> {
        let Some(entity) = self.objects.remove(key) else {
            return Ok(None);
        };
        self.save()?;
        Ok(Some(entity))
    }

    // ── Backing file ────────────────────────────────────────────

    /// Overwrites the backing file with every live entity's projection.
    pub fn save(&self) -> StorageResult<()> {
        let document: BTreeMap<&RegistryKey, Record> = self
            .objects
            .iter()
            .map(|(key, entity)| (key, entity.project()))
            .collect();
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        fs::write(&self.config.path, json)?;
        debug!("Saved {} objects to {:?}", document.len(), self.config.path);
        Ok(())
    }

    /// Loads the backing file into the live collection.
    ///
    /// A missing file is not an error. A file that does not parse is. Loaded
    /// entries are merged into the collection; nothing is inserted unless the
    /// whole file was accepted. Returns the number of entities loaded.
    pub fn reload(&mut self) -> StorageResult<usize> {
        let contents = match fs::read_to_string(&self.config.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No storage file at {:?}, nothing to load", self.config.path);
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let document: BTreeMap<String, Record> = serde_json::from_str(&contents)?;

        let mut loaded = Vec::with_capacity(document.len());
        for (raw_key, record) in document {
            match self.rehydrate(&raw_key, record) {
                Ok(entry) => loaded.push(entry),
                Err(e @ (ModelError::UnknownType(_) | ModelError::InvalidKey(_)))
                    if self.config.reload_policy == ReloadPolicy::SkipUnknown =>
                {
                    warn!("Skipping stored object {:?}: {}", raw_key, e);
                }
                Err(e) => return Err(StorageError::Model(e)),
            }
        }

        let count = loaded.len();
        self.objects.extend(loaded);
        info!("Loaded {} objects from {:?}", count, self.config.path);
        Ok(count)
    }

    fn rehydrate(&self, raw_key: &str, record: Record) -> Result<(RegistryKey, Entity), ModelError> {
        let key = RegistryKey::parse(raw_key)?;
        let entity = self.registry.get(key.entity_type())?.reconstruct(record)?;
        Ok((key, entity))
    }
}
