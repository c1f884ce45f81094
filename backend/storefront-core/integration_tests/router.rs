use storefront_core::error::PreferenceError;
use storefront_core::preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use storefront_core::router::{CURRENT_PAGE_KEY, Page, ViewRouter};

use common::ErrorLocation;

use std::panic::Location;
use std::sync::Arc;

use tempfile::TempDir;

/// **VALUE**: The selected page survives a reload.
///
/// **WHY THIS MATTERS**: Users returning from checkout land back on the page
/// they were browsing.
///
/// **BUG THIS CATCHES**: Would catch persisting under a different key than
/// the one `restore` reads, or writing the Debug form of the page.
#[test]
fn given_popular_selected_when_reloaded_then_popular_restored() {
    // GIVEN: A file-backed store and a router that selected Popular
    let dir = TempDir::new().expect("temp dir");
    let router = ViewRouter::new(Arc::new(FilePreferenceStore::new(dir.path())));
    router.select(Page::Popular);

    // WHEN: A new router (new page load) restores from the same directory
    let reloaded = ViewRouter::new(Arc::new(FilePreferenceStore::new(dir.path())));
    let page = reloaded.restore();

    // THEN: Popular is back
    assert_eq!(page, Page::Popular);
    assert_eq!(reloaded.current(), Page::Popular);
}

#[test]
fn given_nothing_stored_when_restored_then_products() {
    let router = ViewRouter::new(Arc::new(MemoryPreferenceStore::new()));

    assert_eq!(router.restore(), Page::Products);
}

#[test]
fn given_unknown_stored_value_when_restored_then_products() {
    let store = Arc::new(MemoryPreferenceStore::new());
    store.set(CURRENT_PAGE_KEY, "Checkout").expect("set");
    let router = ViewRouter::new(store);

    assert_eq!(router.restore(), Page::Products);
}

/// Store whose every operation fails.
struct BrokenStore;

impl PreferenceStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
        Err(unavailable())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
        Err(unavailable())
    }

    fn remove(&self, _key: &str) -> Result<(), PreferenceError> {
        Err(unavailable())
    }
}

#[track_caller]
fn unavailable() -> PreferenceError {
    PreferenceError::Unavailable {
        location: ErrorLocation::from(Location::caller()),
        reason: "storage disabled".to_string(),
    }
}

/// **VALUE**: Storage failures never block navigation between pages.
#[test]
fn given_broken_store_when_selecting_then_selection_still_applies() {
    let router = ViewRouter::new(Arc::new(BrokenStore));

    router.select(Page::Recent);

    assert_eq!(router.current(), Page::Recent);
    assert_eq!(router.restore(), Page::Products);
}
