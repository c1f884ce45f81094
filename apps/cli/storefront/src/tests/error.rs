// Unit tests for error module
// Tests serialization (used by --json) and conversion from core errors

use crate::error::StorefrontAppError;

use storefront_core::error::{ApiError, CheckoutError, SessionError};
use storefront_core::session::SessionState;

/// **VALUE**: Tests that errors can be serialized for `--json` output.
///
/// **BUG THIS CATCHES**: Would catch a non-serializable field (such as a raw
/// core error) being added to a variant.
#[test]
fn given_app_error_when_serialized_then_tagged_json() {
    // GIVEN: A product error
    let err = StorefrontAppError::product("Unknown product 'mug'");

    // WHEN: Serializing to JSON
    let json = serde_json::to_value(&err).expect("serializable");

    // THEN: Tagged with the variant and carrying message and location
    assert_eq!(json["type"], "Product");
    assert_eq!(json["data"]["message"], "Unknown product 'mug'");
    assert!(json["data"]["location"]["file"].as_str().is_some_and(|file| file.ends_with("error.rs")));
}

#[test]
fn given_session_error_when_converted_then_message_kept() {
    let err: StorefrontAppError = SessionError::not_authorized(SessionState::Unauthorized).into();

    assert!(matches!(err, StorefrontAppError::Session { .. }));
    assert!(err.to_string().contains("state: unauthorized"));
}

#[test]
fn given_checkout_error_when_converted_then_checkout_variant() {
    let err: StorefrontAppError =
        CheckoutError::submit(ApiError::from_http_response("stripe/create-checkout-session", 500, "boom")).into();

    assert!(matches!(err, StorefrontAppError::Checkout { .. }));
    assert!(err.to_string().contains("HTTP 500"));
}
