mod common;

use common::{sibling, temp_storage};
use hbnb_model::{AttrValue, EntitySchema, ModelError, Record, RegistryKey, TYPE_TAG};
use hbnb_storage::{DEFAULT_FILE, FileStorage, ReloadPolicy, StorageConfig, StorageError};
use pretty_assertions::assert_eq;

// ── Config ───────────────────────────────────────────────────────

#[test]
fn default_config() {
    let config = StorageConfig::default();
    assert_eq!(config.path.to_str(), Some(DEFAULT_FILE));
    assert_eq!(config.reload_policy, ReloadPolicy::SkipUnknown);
    assert!(!config.pretty);
}

#[test]
fn new_engine_is_empty() {
    let (_dir, storage) = temp_storage();
    assert!(storage.is_empty());
    assert_eq!(storage.registry().len(), 7);
}

// ── register / create ────────────────────────────────────────────

#[test]
fn register_inserts_under_type_dot_id() {
    let (_dir, mut storage) = temp_storage();
    let entity = EntitySchema::base_model().instantiate();
    let expected = format!("BaseModel.{}", entity.id());
    let key = storage.register(entity);
    assert_eq!(key.to_string(), expected);
    assert!(storage.get(&key).is_some());
}

#[test]
fn register_same_entity_twice_keeps_one_entry() {
    let (_dir, mut storage) = temp_storage();
    let entity = EntitySchema::user().instantiate();
    storage.register(entity.clone());
    storage.register(entity);
    assert_eq!(storage.len(), 1);
}

#[test]
fn register_overwrite_is_last_write_wins() {
    let (_dir, mut storage) = temp_storage();
    let mut entity = EntitySchema::state().instantiate();
    let key = storage.register(entity.clone());
    entity.set_attribute("name", "Texas").unwrap();
    storage.register(entity);
    assert_eq!(
        storage.get(&key).unwrap().get("name"),
        Some(&AttrValue::from("Texas"))
    );
}

#[test]
fn create_registers_without_writing() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("City").unwrap();
    assert_eq!(key.entity_type(), "City");
    assert_eq!(key.id().as_str().len(), 36);
    assert!(storage.get(&key).is_some());
    assert!(!storage.path().exists());
}

#[test]
fn create_unknown_type_fails() {
    let (_dir, mut storage) = temp_storage();
    let err = storage.create("MyModel").unwrap_err();
    assert!(err.is_unknown_type());
    assert!(storage.is_empty());
}

#[test]
fn create_with_sets_initial_attributes() {
    let (_dir, mut storage) = temp_storage();
    let mut attrs = Record::new();
    attrs.insert("name".into(), "My little house".into());
    attrs.insert("number_rooms".into(), AttrValue::Int(4));
    let key = storage.create_with("Place", attrs).unwrap();
    let place = storage.get(&key).unwrap();
    assert_eq!(place.get("name"), Some(&AttrValue::from("My little house")));
    assert_eq!(place.get("number_rooms"), Some(&AttrValue::Int(4)));
    assert_eq!(place.get("max_guest"), Some(&AttrValue::Int(0)));
}

#[test]
fn create_with_rejects_reserved_attribute() {
    let (_dir, mut storage) = temp_storage();
    let mut attrs = Record::new();
    attrs.insert("id".into(), "mine".into());
    let err = storage.create_with("User", attrs).unwrap_err();
    assert!(matches!(err, StorageError::Model(ModelError::ReadOnlyAttribute(_))));
    assert!(storage.is_empty());
}

// ── filter / count ───────────────────────────────────────────────

#[test]
fn filter_by_name_returns_only_that_type() {
    let (_dir, mut storage) = temp_storage();
    let u1 = storage.create("User").unwrap();
    let u2 = storage.create("User").unwrap();
    storage.create("BaseModel").unwrap();
    storage.create("State").unwrap();

    let users = storage.filter("User").unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.contains_key(&u1));
    assert!(users.contains_key(&u2));
    assert!(users.values().all(|e| e.entity_type() == "User"));
}

#[test]
fn filter_ignores_shared_attribute_names() {
    let (_dir, mut storage) = temp_storage();
    storage.create("State").unwrap();
    storage.create("City").unwrap();
    storage.create("Amenity").unwrap();
    // all three declare `name`
    assert_eq!(storage.count("State").unwrap(), 1);
    assert_eq!(storage.count("City").unwrap(), 1);
    assert_eq!(storage.count("Amenity").unwrap(), 1);
}

#[test]
fn base_model_filter_matches_concrete_base_models_only() {
    let (_dir, mut storage) = temp_storage();
    storage.create("BaseModel").unwrap();
    storage.create("User").unwrap();
    assert_eq!(storage.count("BaseModel").unwrap(), 1);
}

#[test]
fn filter_by_schema_skips_registry_lookup() {
    let (_dir, mut storage) = temp_storage();
    storage.create("Review").unwrap();
    let schema = EntitySchema::review();
    assert_eq!(storage.filter(&schema).unwrap().len(), 1);

    let unregistered = EntitySchema::new("Ghost");
    assert_eq!(storage.count(&unregistered).unwrap(), 0);
}

#[test]
fn filter_unknown_name_fails() {
    let (_dir, storage) = temp_storage();
    let err = storage.filter("MyModel").unwrap_err();
    assert!(err.is_unknown_type());
}

#[test]
fn count_of_empty_type_is_zero() {
    let (_dir, mut storage) = temp_storage();
    storage.create("User").unwrap();
    assert_eq!(storage.count("Place").unwrap(), 0);
}

#[test]
fn all_returns_every_entry() {
    let (_dir, mut storage) = temp_storage();
    storage.create("User").unwrap();
    storage.create("Place").unwrap();
    assert_eq!(storage.all().len(), 2);
}

// ── touch / update ───────────────────────────────────────────────

#[test]
fn touch_advances_updated_at_and_writes_file() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("BaseModel").unwrap();
    let before = storage.get(&key).unwrap().updated_at();
    let created = storage.get(&key).unwrap().created_at();

    assert!(storage.touch(&key).unwrap());

    let entity = storage.get(&key).unwrap();
    assert!(entity.updated_at() > before);
    assert_eq!(entity.created_at(), created);
    let contents = std::fs::read_to_string(storage.path()).unwrap();
    assert!(contents.contains(&key.to_string()));
}

#[test]
fn touch_missing_key_is_false() {
    let (_dir, mut storage) = temp_storage();
    let key = RegistryKey::new("User", "nope");
    assert!(!storage.touch(&key).unwrap());
    assert!(!storage.path().exists());
}

#[test]
fn touch_writes_whole_collection() {
    let (_dir, mut storage) = temp_storage();
    let a = storage.create("User").unwrap();
    let b = storage.create("City").unwrap();
    storage.touch(&a).unwrap();
    let contents = std::fs::read_to_string(storage.path()).unwrap();
    assert!(contents.contains(&a.to_string()));
    assert!(contents.contains(&b.to_string()));
}

#[test]
fn update_sets_attribute_and_persists() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("BaseModel").unwrap();
    let before = storage.get(&key).unwrap().updated_at();

    assert!(storage.update(&key, "name", "NewName").unwrap());

    let entity = storage.get(&key).unwrap();
    assert_eq!(entity.get("name"), Some(&AttrValue::from("NewName")));
    assert!(entity.updated_at() > before);

    let mut reloaded = sibling(&storage);
    reloaded.reload().unwrap();
    assert_eq!(
        reloaded.get(&key).unwrap().get("name"),
        Some(&AttrValue::from("NewName"))
    );
}

#[test]
fn update_missing_key_is_false() {
    let (_dir, mut storage) = temp_storage();
    let key = RegistryKey::new("BaseModel", "NonExistentID");
    assert!(!storage.update(&key, "name", "x").unwrap());
}

#[test]
fn update_reserved_attribute_fails_without_writing() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("BaseModel").unwrap();
    let err = storage.update(&key, "created_at", "2020-01-01T00:00:00.000000").unwrap_err();
    assert!(matches!(err, StorageError::Model(ModelError::ReadOnlyAttribute(_))));
    assert!(!storage.path().exists());
}

#[test]
fn update_text_coerces_declared_numbers() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("Place").unwrap();
    storage.update_text(&key, "number_rooms", "3").unwrap();
    storage.update_text(&key, "latitude", "48.85").unwrap();
    storage.update_text(&key, "nickname", "42").unwrap();
    let place = storage.get(&key).unwrap();
    assert_eq!(place.get("number_rooms"), Some(&AttrValue::Int(3)));
    assert_eq!(place.get("latitude"), Some(&AttrValue::Float(48.85)));
    assert_eq!(place.get("nickname"), Some(&AttrValue::from("42")));
}

#[test]
fn update_many_is_all_or_nothing() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("User").unwrap();

    let mut attrs = Record::new();
    attrs.insert("first_name".into(), "Betty".into());
    attrs.insert("age".into(), AttrValue::Int(30));
    assert!(storage.update_many(&key, attrs).unwrap());
    let user = storage.get(&key).unwrap();
    assert_eq!(user.get("first_name"), Some(&AttrValue::from("Betty")));
    assert_eq!(user.get("age"), Some(&AttrValue::Int(30)));

    let mut bad = Record::new();
    bad.insert("last_name".into(), "Holberton".into());
    bad.insert("id".into(), "x".into());
    assert!(storage.update_many(&key, bad).is_err());
    assert_eq!(
        storage.get(&key).unwrap().get("last_name"),
        Some(&AttrValue::from(""))
    );
}

// ── destroy ──────────────────────────────────────────────────────

#[test]
fn destroy_removes_and_persists() {
    let (_dir, mut storage) = temp_storage();
    let keep = storage.create("User").unwrap();
    let gone = storage.create("User").unwrap();

    let removed = storage.destroy(&gone).unwrap();
    assert_eq!(removed.map(|e| e.key()), Some(gone.clone()));
    assert!(storage.get(&gone).is_none());

    let mut reloaded = sibling(&storage);
    reloaded.reload().unwrap();
    assert!(reloaded.get(&keep).is_some());
    assert!(reloaded.get(&gone).is_none());
}

#[test]
fn destroy_twice_reports_absence() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("BaseModel").unwrap();
    assert!(storage.destroy(&key).unwrap().is_some());
    assert!(storage.destroy(&key).unwrap().is_none());
}

#[test]
fn removing_from_all_mut_then_saving_deletes() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("Amenity").unwrap();
    storage.save().unwrap();

    storage.all_mut().remove(&key);
    storage.save().unwrap();

    let mut reloaded = sibling(&storage);
    assert_eq!(reloaded.reload().unwrap(), 0);
}

// ── save ─────────────────────────────────────────────────────────

#[test]
fn save_writes_projected_records() {
    let (_dir, mut storage) = temp_storage();
    let key = storage.create("State").unwrap();
    storage.update(&key, "name", "Nevada").unwrap();

    let contents = std::fs::read_to_string(storage.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let record = &doc[key.to_string()];
    assert_eq!(record["id"], key.id().as_str());
    assert_eq!(record[TYPE_TAG], "State");
    assert_eq!(record["name"], "Nevada");
    let created = record["created_at"].as_str().unwrap();
    assert_eq!(created.len(), "2017-09-28T21:03:54.052298".len());
}

#[test]
fn save_of_empty_collection_writes_empty_object() {
    let (_dir, storage) = temp_storage();
    storage.save().unwrap();
    assert_eq!(std::fs::read_to_string(storage.path()).unwrap(), "{}");
}

#[test]
fn save_pretty_indents() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = StorageConfig {
        pretty: true,
        ..StorageConfig::at(dir.path().join("pretty.json"))
    };
    let mut storage = FileStorage::new(config);
    storage.create("User").unwrap();
    storage.save().unwrap();
    let contents = std::fs::read_to_string(storage.path()).unwrap();
    assert!(contents.contains("\n  "));
}

#[test]
fn save_into_missing_directory_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let storage = FileStorage::new(StorageConfig::at(dir.path().join("no/such/dir.json")));
    let err = storage.save().unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}
