use crate::helpers::{address_bar, base_url, cart_item, client, CHECKOUT_PATH};

use storefront_core::cart::{CartEngine, ProductId};
use storefront_core::checkout::{CheckoutCoordinator, CheckoutOutcome};
use storefront_core::error::CheckoutError;
use storefront_core::navigation::AddressBar;

use std::sync::Arc;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn coordinator(server: &MockServer, bar: &Arc<AddressBar>) -> CheckoutCoordinator {
    CheckoutCoordinator::new(client(server), bar.clone(), base_url())
}

/// **VALUE**: An empty cart never reaches the payment processor.
///
/// **BUG THIS CATCHES**: Would catch creating an empty checkout session (and
/// redirecting the user to a blank payment page).
#[tokio::test]
async fn given_empty_cart_when_checkout_then_no_request_and_empty_signal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHECKOUT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let bar = address_bar("");
    let cart = CartEngine::new();

    let outcome = coordinator(&server, &bar)
        .initiate_checkout(&cart.snapshot())
        .await
        .expect("empty cart is not an error");

    assert_eq!(outcome, CheckoutOutcome::EmptyCart);
    assert!(bar.navigations().is_empty());
}

/// **VALUE**: Verifies the exact request body for a two-line cart.
///
/// **WHY THIS MATTERS**: The backend charges from this body. Any drift in
/// price, quantity or line count is a billing bug.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Lines submitted in insertion order instead of product order
/// - Prices serialized as strings
/// - Wrong return addresses
#[tokio::test]
async fn given_two_lines_when_checkout_then_submits_exact_lines_and_redirects() {
    // GIVEN: A: qty 2 @ 5.00, B: qty 1 @ 3.00 (added B first)
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHECKOUT_PATH))
        .and(query_param("return_type", "json"))
        .and(query_param("success_url", "https://shop.test/?success=true"))
        .and(query_param("cancel_url", "https://shop.test/?canceled=true"))
        .and(body_json(json!([
            { "price": 5.0, "quantity": 2 },
            { "price": 3.0, "quantity": 1 }
        ])))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "url": "https://pay.test/c/cs_123" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let bar = address_bar("");
    let cart = CartEngine::new();
    cart.increment(&cart_item("B", 300));
    cart.increment(&cart_item("A", 500));
    cart.increment(&cart_item("A", 500));

    // WHEN: Checking out
    let outcome = coordinator(&server, &bar)
        .initiate_checkout(&cart.snapshot())
        .await
        .expect("checkout should succeed");

    // THEN: Redirected to the returned address
    let expected: Url = "https://pay.test/c/cs_123".parse().expect("valid url");
    assert_eq!(outcome, CheckoutOutcome::Redirected { url: expected.clone() });
    assert_eq!(bar.last_navigation(), Some(expected));
}

#[tokio::test]
async fn given_backend_error_when_checkout_then_no_navigation_and_cart_intact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHECKOUT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let bar = address_bar("");
    let cart = CartEngine::new();
    cart.increment(&cart_item("A", 500));

    let result = coordinator(&server, &bar)
        .initiate_checkout(&cart.snapshot())
        .await;

    assert!(matches!(result, Err(CheckoutError::Submit { .. })));
    assert!(bar.navigations().is_empty());
    assert_eq!(cart.quantity_of(&ProductId::new("A")), 1);
}

#[tokio::test]
async fn given_response_without_url_when_checkout_then_submit_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHECKOUT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cs_123" })))
        .expect(1)
        .mount(&server)
        .await;
    let bar = address_bar("");
    let cart = CartEngine::new();
    cart.increment(&cart_item("A", 500));

    let result = coordinator(&server, &bar)
        .initiate_checkout(&cart.snapshot())
        .await;

    assert!(matches!(result, Err(CheckoutError::Submit { .. })));
    assert!(bar.navigations().is_empty());
}

#[tokio::test]
async fn given_unusable_redirect_when_checkout_then_invalid_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHECKOUT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "javascript:alert(1)" })))
        .expect(1)
        .mount(&server)
        .await;
    let bar = address_bar("");
    let cart = CartEngine::new();
    cart.increment(&cart_item("A", 500));

    let result = coordinator(&server, &bar)
        .initiate_checkout(&cart.snapshot())
        .await;

    assert!(matches!(result, Err(CheckoutError::InvalidRedirect { .. })));
    assert!(bar.navigations().is_empty());
}
