use storefront_core::preferences::{FilePreferenceStore, PreferenceStore};

use tempfile::TempDir;

#[test]
fn given_file_store_when_value_set_then_other_instance_reads_it() {
    let dir = TempDir::new().expect("temp dir");
    let writer = FilePreferenceStore::new(dir.path().join("nested"));

    writer.set("currentPage", "Recent").expect("set");
    writer.set("theme", "dark").expect("set");

    let reader = FilePreferenceStore::new(dir.path().join("nested"));
    assert_eq!(reader.get("currentPage").expect("get").as_deref(), Some("Recent"));
    assert_eq!(reader.get("theme").expect("get").as_deref(), Some("dark"));
    assert_eq!(reader.get("missing").expect("get"), None);
}

#[test]
fn given_value_when_removed_then_absent() {
    let dir = TempDir::new().expect("temp dir");
    let store = FilePreferenceStore::new(dir.path());
    store.set("currentPage", "Popular").expect("set");

    store.remove("currentPage").expect("remove");

    assert_eq!(store.get("currentPage").expect("get"), None);
}

/// **VALUE**: A corrupt preferences file does not lock the user out of
/// saving preferences forever.
///
/// **BUG THIS CATCHES**: Would catch `set` propagating the parse error of
/// the old file instead of replacing it.
#[test]
fn given_corrupt_file_when_set_then_file_replaced() {
    let dir = TempDir::new().expect("temp dir");
    let store = FilePreferenceStore::new(dir.path());
    std::fs::write(store.path(), "{not json").expect("write corrupt file");
    assert!(store.get("currentPage").is_err());

    store.set("currentPage", "Popular").expect("set over corrupt file");

    assert_eq!(store.get("currentPage").expect("get").as_deref(), Some("Popular"));
    assert!(!dir.path().join("preferences.json.tmp").exists());
}
