use crate::helpers::client;

use storefront_core::catalog::CatalogService;
use storefront_core::session::SessionState;

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// **VALUE**: Products and prices come from two endpoints and must be joined
/// before anything can be added to the cart.
#[tokio::test]
async fn given_products_and_prices_when_loaded_then_joined_in_major_units() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/stripe/products",
        ResponseTemplate::new(200).set_body_json(json!([
            { "id": "prod_mug", "name": "Mug", "images": ["https://img.test/mug.png"], "default_price": "price_mug" },
            { "id": "prod_hat", "name": "Hat", "images": [], "default_price": null }
        ])),
        1,
    )
    .await;
    mount_get(
        &server,
        "/stripe/prices",
        ResponseTemplate::new(200).set_body_json(json!([
            { "id": "price_mug", "product": "prod_mug", "currency": "usd", "unit_amount": 1250 }
        ])),
        1,
    )
    .await;

    let entries = CatalogService::new(client(&server))
        .load_catalog()
        .await
        .expect("catalog");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].unit_price, Some(Decimal::new(1250, 2)));
    assert!(entries[0].cart_item().is_some());
    assert_eq!(entries[1].unit_price, None);
    assert!(entries[1].cart_item().is_none());
}

#[tokio::test]
async fn given_popularity_when_loaded_then_backend_order_kept() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/stripe/product-popularity",
        ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b", "name": "B", "images": [], "quantity": 40 },
            { "id": "a", "name": "A", "images": [], "quantity": 12 }
        ])),
        1,
    )
    .await;

    let ranked = CatalogService::new(client(&server)).popular().await.expect("popular");

    let ids: Vec<&str> = ranked.iter().map(|product| product.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

/// **VALUE**: Idempotent catalog reads ride out a brief backend hiccup.
///
/// **BUG THIS CATCHES**: Would catch the retry loop giving up on the first
/// 503, or retrying non-idempotent calls.
#[tokio::test]
async fn given_transient_503_when_listing_products_then_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stripe/products"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, "/stripe/products", ResponseTemplate::new(200).set_body_json(json!([])), 1).await;

    let products = client(&server)
        .with_catalog_retry(Duration::from_secs(5))
        .list_products()
        .await
        .expect("retry should succeed");

    assert!(products.is_empty());
}

#[tokio::test]
async fn given_client_error_when_listing_products_then_not_retried() {
    let server = MockServer::start().await;
    mount_get(&server, "/stripe/products", ResponseTemplate::new(404), 1).await;

    let result = client(&server)
        .with_catalog_retry(Duration::from_secs(5))
        .list_products()
        .await;

    assert_eq!(result.expect_err("404").status_code(), Some(404));
}

/// **VALUE**: Purchase history is private; without a session nothing is asked.
#[tokio::test]
async fn given_unauthorized_when_past_purchases_then_zero_calls() {
    let server = MockServer::start().await;
    mount_get(&server, "/stripe/current-user-past-purchases", ResponseTemplate::new(200), 0).await;
    let catalog = CatalogService::new(client(&server));

    assert!(catalog.past_purchases(SessionState::Unauthorized).await.is_empty());
    assert!(catalog.past_purchases(SessionState::Unknown).await.is_empty());
}

#[tokio::test]
async fn given_authorized_when_past_purchases_fail_then_empty() {
    let server = MockServer::start().await;
    mount_get(&server, "/stripe/current-user-past-purchases", ResponseTemplate::new(500), 1).await;

    let purchases = CatalogService::new(client(&server))
        .past_purchases(SessionState::Authorized)
        .await;

    assert!(purchases.is_empty());
}

#[tokio::test]
async fn given_authorized_when_past_purchases_load_then_decoded() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/stripe/current-user-past-purchases",
        ResponseTemplate::new(200).set_body_json(json!([{
            "quantity": 2,
            "created": 1_700_000_000,
            "currency": "usd",
            "product": "prod_mug",
            "unit_amount": 1250,
            "details": { "name": "Mug", "images": ["https://img.test/mug.png"] }
        }])),
        1,
    )
    .await;

    let purchases = CatalogService::new(client(&server))
        .past_purchases(SessionState::Authorized)
        .await;

    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].details.name, "Mug");
    assert_eq!(purchases[0].spend(), Decimal::new(2500, 2));
}
