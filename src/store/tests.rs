use super::*;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_session_store_basic_operations() {
    let mut store = SessionStore::new();
    assert!(store.is_empty());

    store.set("granularity", 3);
    store.set("voice", "alto");
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("granularity"), Some(&json!(3)));
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["granularity", "voice"]);

    assert_eq!(store.remove("voice"), Some(json!("alto")));
    assert_eq!(store.get("voice"), None);
}

#[test]
fn test_memory_storage_round_trip() {
    let backend = MemoryStorage::new();
    let mut store = SessionStore::new();
    store.set("granularity", 1);
    store.save(&backend).unwrap();

    let loaded = SessionStore::load(&backend).unwrap();
    assert_eq!(loaded, store);

    backend.clear().unwrap();
    assert!(SessionStore::load(&backend).unwrap().is_empty());
}

#[test]
fn test_memory_storage_with_entries() {
    let mut entries = Entries::new();
    entries.insert("granularity".to_string(), json!(6));
    let backend = MemoryStorage::with_entries(entries);
    let store = SessionStore::load(&backend).unwrap();
    assert_eq!(store.get("granularity"), Some(&json!(6)));
    assert_eq!(backend.name(), "MemoryStorage");
}

#[test]
fn test_file_storage_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state.json");
    let backend = FileStorage::new(&path);

    let mut store = SessionStore::new();
    store.set("granularity", 2);
    store.save(&backend).unwrap();
    assert!(path.exists());

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["format_version"], json!(1));
    assert_eq!(raw["entries"]["granularity"], json!(2));

    let loaded = SessionStore::load(&backend).unwrap();
    assert_eq!(loaded.get("granularity"), Some(&json!(2)));
}

#[test]
fn test_file_storage_leaves_no_temp_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state.json");
    let backend = FileStorage::new(&path);
    backend.save_all(&Entries::new()).unwrap();

    let names: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("state.json")]);
}

#[test]
fn test_file_storage_load_nonexistent() {
    let tmp = TempDir::new().unwrap();
    let backend = FileStorage::new(tmp.path().join("missing.json"));
    assert!(backend.load_all().unwrap().is_empty());
}

#[test]
fn test_file_storage_creates_parent_dirs() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dirs").join("state.json");
    let backend = FileStorage::new(&path);
    backend.save_all(&Entries::new()).unwrap();
    assert!(path.exists());
}

#[test]
fn test_file_storage_clear() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state.json");
    std::fs::write(&path, "{}").unwrap();

    let backend = FileStorage::new(&path);
    backend.clear().unwrap();
    assert!(!path.exists());
    backend.clear().unwrap();
}

#[test]
fn test_file_storage_ignores_other_format_version() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state.json");
    std::fs::write(&path, r#"{"format_version":2,"entries":{"granularity":1}}"#).unwrap();

    let backend = FileStorage::new(&path);
    assert!(backend.load_all().unwrap().is_empty());
}

#[test]
fn test_file_storage_corrupt_file_is_store_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FileStorage::new(&path).load_all().unwrap_err();
    assert_eq!(err.kind, ErrorType::Store);
    assert_eq!(err.code, "STORE_PARSE_ERROR");
}
