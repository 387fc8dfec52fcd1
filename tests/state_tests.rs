//! State tests: persistence round-trip, tolerant loading, handled-image de-duplication.

use memento::state::{LocalStorage, StateKeys};
use memento::{Memory, StateStore};
use std::fs;
use std::path::{Path, PathBuf};

fn memory(name: &str) -> Memory {
    Memory {
        description: format!("memory {name}"),
        path: PathBuf::from("/dest").join(name),
        thumbs: vec![PathBuf::from("/dest").join(name).join("thumb/a.jpg")],
    }
}

#[test]
fn test_open_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::open(&dir.path().join("memento.json")).unwrap();
    assert!(store.source_path().is_none());
    assert!(store.destination_path().is_none());
    assert!(store.handled_images().is_empty());
    assert!(store.memories().is_empty());
}

#[test]
fn test_state_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("memento.json");
    {
        let mut store = StateStore::open(&path).unwrap();
        store.set_source_path(Path::new("/photos/in")).unwrap();
        store.set_destination_path(Path::new("/photos/out")).unwrap();
        store.remember_handled_images(&["a.jpg", "b.jpg"]).unwrap();
        store.remember_memory(memory("one")).unwrap();
        store.remember_memory(memory("two")).unwrap();
        store.set_image_note("a.jpg", "not persisted");
    }
    assert!(path.is_file());

    let store = StateStore::open(&path).unwrap();
    assert_eq!(store.source_path(), Some(Path::new("/photos/in")));
    assert_eq!(store.destination_path(), Some(Path::new("/photos/out")));
    assert_eq!(store.handled_images(), ["a.jpg", "b.jpg"]);
    assert_eq!(store.memories(), [memory("one"), memory("two")]);
    assert!(store.image_notes().is_empty());
}

#[test]
fn test_state_file_is_string_key_value_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memento.json");
    let mut store = StateStore::open(&path).unwrap();
    store.remember_handled_images(&["a.jpg"]).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[StateKeys::HANDLED_IMAGES], serde_json::json!("[\"a.jpg\"]"));
}

#[test]
fn test_corrupt_memories_value_does_not_block_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memento.json");
    let raw = serde_json::json!({
        "sourcePath": "/photos/in",
        "handledImages": "[\"x.jpg\"]",
        "memories": "{not json",
    });
    fs::write(&path, raw.to_string()).unwrap();

    let store = StateStore::open(&path).unwrap();
    assert_eq!(store.source_path(), Some(Path::new("/photos/in")));
    assert_eq!(store.handled_images(), ["x.jpg"]);
    assert!(store.memories().is_empty());
}

#[test]
fn test_non_object_state_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memento.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(StateStore::open(&path).is_err());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_folder_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let mut store = StateStore::in_memory();
    let bad = Path::new(OsStr::from_bytes(b"/photos/\xffin"));
    assert!(store.set_source_path(bad).is_err());
    assert!(store.set_destination_path(bad).is_err());
    assert!(store.source_path().is_none());
    assert!(store.destination_path().is_none());
}

#[test]
fn test_handled_images_do_not_duplicate() {
    let mut store = StateStore::in_memory();
    store.remember_handled_images(&["a.jpg", "b.jpg"]).unwrap();
    store.remember_handled_images(&["b.jpg", "c.jpg", "a.jpg"]).unwrap();
    assert_eq!(store.handled_images(), ["a.jpg", "b.jpg", "c.jpg"]);
    assert!(store.is_handled("c.jpg"));
    assert!(!store.is_handled("d.jpg"));
}

#[test]
fn test_image_notes_set_and_clear() {
    let mut store = StateStore::in_memory();
    store.set_image_note("a.jpg", "beach");
    assert_eq!(store.image_note("a.jpg"), Some("beach"));
    store.set_image_note("a.jpg", "   ");
    assert_eq!(store.image_note("a.jpg"), None);
}

#[test]
fn test_local_storage_in_memory_writes_nothing() {
    let mut storage = LocalStorage::in_memory();
    storage.set_item("k", "v").unwrap();
    assert_eq!(storage.get_item("k"), Some("v"));
    assert!(storage.path().is_none());
}

#[test]
fn test_local_storage_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memento.json");
    let mut storage = LocalStorage::open(&path).unwrap();
    storage.set_item("k", "v").unwrap();
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["memento.json"]);
}
