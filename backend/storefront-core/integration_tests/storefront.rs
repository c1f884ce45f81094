use crate::helpers::{address_bar, cart_item, mount_logout, mount_validate, storefront, valid, CHECKOUT_PATH};

use storefront_core::cart::ProductId;
use storefront_core::checkout::CheckoutOutcome;
use storefront_core::preferences::{FilePreferenceStore, MemoryPreferenceStore};
use storefront_core::router::{Page, View};
use storefront_core::session::SessionState;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Mounting resolves the session once and brings back the saved page.
#[tokio::test]
async fn given_saved_page_and_valid_cookie_when_mounted_then_view_matches() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(true), 1).await;
    let dir = TempDir::new().expect("temp dir");
    let bar = address_bar("");
    let app = storefront(&server, &bar, Arc::new(FilePreferenceStore::new(dir.path())));
    app.router().select(Page::Recent);
    assert_eq!(app.view().await, View::Loading);

    let state = app.mount().await;
    app.mount().await;

    assert_eq!(state, SessionState::Authorized);
    assert_eq!(app.view().await, View::Recent);
}

/// **VALUE**: A reload keeps the page, drops the in-memory cart and runs
/// session resolution again.
///
/// **BUG THIS CATCHES**: Would catch the per-load resolution latch never
/// being re-armed, leaving a reload stuck on the previous state.
#[tokio::test]
async fn given_mounted_storefront_when_reloaded_then_resolves_again() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(true), 2).await;
    let bar = address_bar("");
    let app = storefront(&server, &bar, Arc::new(MemoryPreferenceStore::new()));
    app.mount().await;
    app.router().select(Page::Popular);
    app.cart().increment(&cart_item("A", 500));

    let state = app.reload().await;

    assert_eq!(state, SessionState::Authorized);
    assert_eq!(app.router().current(), Page::Popular);
    assert!(app.cart().is_empty());
}

#[tokio::test]
async fn given_cart_when_storefront_checks_out_then_redirected() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(false), 1).await;
    mount_logout(&server, 200, 1).await;
    Mock::given(method("POST"))
        .and(path(CHECKOUT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "https://pay.test/c/1" })))
        .expect(1)
        .mount(&server)
        .await;
    let bar = address_bar("");
    let app = storefront(&server, &bar, Arc::new(MemoryPreferenceStore::new()));
    app.mount().await;
    app.cart().increment(&cart_item("A", 500));

    let outcome = app.checkout().await.expect("checkout");

    assert!(matches!(outcome, CheckoutOutcome::Redirected { .. }));
    assert_eq!(app.cart().quantity_of(&ProductId::new("A")), 1);
}

#[tokio::test]
async fn given_empty_cart_when_storefront_checks_out_then_empty_signal() {
    let server = MockServer::start().await;
    let bar = address_bar("");
    let app = storefront(&server, &bar, Arc::new(MemoryPreferenceStore::new()));

    let outcome = app.checkout().await.expect("empty cart");

    assert_eq!(outcome, CheckoutOutcome::EmptyCart);
}

#[test]
fn given_invalid_config_when_storefront_built_then_error() {
    let config = storefront_core::config::StorefrontConfig::with_urls("https://api.test", "shop");
    let bar = address_bar("");

    let result = storefront_core::Storefront::new(&config, bar, Arc::new(MemoryPreferenceStore::new()));

    assert!(result.is_err());
}
