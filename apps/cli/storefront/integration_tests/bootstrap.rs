use storefront::bootstrap::{load_config, open_preferences};
use storefront::error::StorefrontAppError;

use storefront_core::preferences::PreferenceStore;

use tempfile::TempDir;

/// **VALUE**: A broken config file surfaces as a core error, keeping its
/// category in `--json` output.
///
/// **BUG THIS CATCHES**: Would catch config failures being flattened into
/// the generic `Storefront` variant.
#[test]
fn given_corrupt_config_when_loaded_then_core_error() {
    // GIVEN: A config directory with unparsable JSON
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("storefront.json"), "{ nope").expect("write");

    // WHEN: Loading through the shell
    let err = load_config(Some(dir.path())).expect_err("corrupt config");

    // THEN: Core variant carrying the config parse message
    assert!(matches!(err, StorefrontAppError::Core { .. }));
    let json = serde_json::to_value(&err).expect("serializable");
    assert_eq!(json["type"], "Core");
    assert!(
        json["data"]["message"]
            .as_str()
            .is_some_and(|message| message.contains("Config Parse Error"))
    );
}

#[test]
fn given_data_dir_when_preferences_opened_then_store_writes_there() {
    let dir = TempDir::new().expect("temp dir");

    let store = open_preferences(Some(dir.path())).expect("store");
    store.set("currentPage", "Recent").expect("set");

    assert!(dir.path().join("preferences.json").exists());
}
