// Unit tests for URL building in the backend client

use crate::api::schemas::{CheckoutLine, PastPurchase};
use crate::api::{StorefrontClient, with_trailing_slash};
use crate::session::IdentityProvider;

use rust_decimal::Decimal;
use url::Url;

/// **VALUE**: Endpoint paths must append to a base with a path prefix.
///
/// **BUG THIS CATCHES**: `Url::join` on `https://api.test/v1` replaces `v1`,
/// silently sending every request to the wrong route.
#[test]
fn given_base_with_path_when_normalized_then_joins_below_it() {
    let base = with_trailing_slash(Url::parse("https://api.test/v1").expect("valid"));

    let joined = base.join("oauth2/token").expect("join");

    assert_eq!(joined.as_str(), "https://api.test/v1/oauth2/token");
}

#[test]
fn given_provider_when_authorize_url_built_then_carries_provider_and_redirect() {
    let client = StorefrontClient::with_endpoint("https://api.test").expect("client");
    let redirect = Url::parse("https://shop.test/").expect("valid");

    let url = client
        .authorize_url(IdentityProvider::Google, &redirect)
        .expect("authorize url");

    assert_eq!(url.path(), "/oauth2/authorize");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("identity_provider".to_string(), "Google".to_string()),
            ("redirect_uri".to_string(), "https://shop.test/".to_string()),
        ]
    );
}

/// **VALUE**: The backend reads `price` as a JSON number.
#[test]
fn given_checkout_line_when_serialized_then_price_is_number() {
    let line = CheckoutLine {
        price: Decimal::new(500, 2),
        quantity: 2,
    };

    let json = serde_json::to_value(line).expect("serialize");

    assert_eq!(json, serde_json::json!({ "price": 5.0, "quantity": 2 }));
}

#[test]
fn given_past_purchase_when_decoded_then_spend_uses_minor_units() {
    let purchase: PastPurchase = serde_json::from_value(serde_json::json!({
        "quantity": 3,
        "created": 1_700_000_000,
        "currency": "usd",
        "product": "prod_1",
        "unit_amount": 1250,
        "details": { "name": "Mug", "images": [] }
    }))
    .expect("decode");

    assert_eq!(purchase.unit_price(), Decimal::new(1250, 2));
    assert_eq!(purchase.spend(), Decimal::new(3750, 2));
}
