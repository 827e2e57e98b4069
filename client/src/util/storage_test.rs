use super::*;

#[derive(Debug, PartialEq, Serialize, serde::Deserialize)]
struct Draft {
    name: String,
    count: u32,
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("token").unwrap(), None);
    storage.set("token", "abc").unwrap();
    assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc"));
    storage.remove("token").unwrap();
    assert_eq!(storage.get("token").unwrap(), None);
}

#[test]
fn load_json_drops_undecodable_values() {
    let storage = MemoryStorage::new();
    storage.set("draft", "{not json").unwrap();
    let loaded: Option<Draft> = load_json(&storage, "draft").unwrap();
    assert!(loaded.is_none());
    assert_eq!(storage.get("draft").unwrap(), None);
}

#[test]
fn load_json_keeps_other_entries_when_dropping_one() {
    let storage = MemoryStorage::new();
    storage.set("draft", r#"{"name":"prod"}"#).unwrap();
    storage.set("token", "abc").unwrap();
    let loaded: Option<Draft> = load_json(&storage, "draft").unwrap();
    assert!(loaded.is_none());
    assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc"));
}

#[test]
fn save_then_load_json() {
    let storage = MemoryStorage::new();
    let draft = Draft { name: "prod".into(), count: 3 };
    save_json(&storage, "draft", &draft).unwrap();
    let loaded: Option<Draft> = load_json(&storage, "draft").unwrap();
    assert_eq!(loaded, Some(draft));
}

#[test]
fn file_storage_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let storage = FileStorage::open(&path).unwrap();
    storage.set("theme", "dark").unwrap();
    storage.set("token", "jwt").unwrap();
    storage.remove("token").unwrap();
    drop(storage);

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(reopened.get("token").unwrap(), None);
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn file_storage_missing_or_empty_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let missing = FileStorage::open(dir.path().join("absent.json")).unwrap();
    assert_eq!(missing.get("anything").unwrap(), None);

    let empty_path = dir.path().join("empty.json");
    std::fs::write(&empty_path, "  ").unwrap();
    let empty = FileStorage::open(&empty_path).unwrap();
    assert_eq!(empty.get("anything").unwrap(), None);
}

#[test]
fn file_storage_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "[1, 2").unwrap();
    let err = FileStorage::open(&path).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
}
