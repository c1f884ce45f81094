//! Shared fixtures for integration tests.
//!
//! - A wiremock backend with one mount helper per endpoint
//! - An in-memory address bar positioned at the storefront
//! - Controllers and storefronts wired against both

use storefront_core::api::StorefrontClient;
use storefront_core::cart::{CartItem, ProductId};
use storefront_core::config::StorefrontConfig;
use storefront_core::navigation::AddressBar;
use storefront_core::preferences::PreferenceStore;
use storefront_core::session::SessionController;
use storefront_core::Storefront;

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BASE_URL: &str = "https://shop.test/";

pub const TOKEN_PATH: &str = "/oauth2/token";
pub const VALIDATE_PATH: &str = "/oauth2/validate_auth_cookie";
pub const LOGOUT_PATH: &str = "/oauth2/logout";
pub const CHECKOUT_PATH: &str = "/stripe/create-checkout-session";

pub fn base_url() -> Url {
    Url::parse(BASE_URL).expect("BASE_URL should parse")
}

/// Address bar showing the storefront with `query` appended (`""` for none).
pub fn address_bar(query: &str) -> Arc<AddressBar> {
    let mut url = base_url();
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    Arc::new(AddressBar::new(url))
}

pub fn client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::with_endpoint(&server.uri()).expect("client should build")
}

pub fn controller(server: &MockServer, bar: &Arc<AddressBar>) -> SessionController {
    SessionController::new(client(server), bar.clone(), base_url())
}

/// Config pointing at `server`, retries off.
pub fn config(server: &MockServer) -> StorefrontConfig {
    let mut config = StorefrontConfig::with_urls(server.uri(), BASE_URL);
    config.http.catalog_retry_max_elapsed_secs = 0;
    config
}

pub fn storefront(
    server: &MockServer,
    bar: &Arc<AddressBar>,
    preferences: Arc<dyn PreferenceStore>,
) -> Storefront {
    Storefront::new(&config(server), bar.clone(), preferences).expect("storefront should build")
}

pub fn cart_item(id: &str, cents: i64) -> CartItem {
    CartItem {
        product_id: ProductId::new(id),
        display_name: format!("Product {id}"),
        thumbnail: Some(format!("https://img.test/{id}.png")),
        price_id: format!("price_{id}"),
        unit_price: Decimal::new(cents, 2),
    }
}

// ============================================
// BACKEND MOUNTS
// ============================================

pub async fn mount_token(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn token_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": "access-token-xyz",
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

pub async fn mount_validate(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn valid(is_valid: bool) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "valid": is_valid }))
}

pub async fn mount_logout(server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(LOGOUT_PATH))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Response held back long enough for the test to act while it is in flight.
pub fn delayed(response: ResponseTemplate) -> ResponseTemplate {
    response.set_delay(Duration::from_millis(300))
}
