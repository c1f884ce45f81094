use storefront_core::error::{ApiError, CheckoutError, CoreError, SessionError};
use storefront_core::router::Page;
use storefront_core::session::IdentityProvider;
use storefront_core::session::SessionState;

use std::error::Error;

/// **VALUE**: Error text carries the creation site for production debugging.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from the
/// constructors, which makes every location point inside the error module.
#[test]
fn given_http_error_when_formatted_then_includes_caller_location() {
    let err = ApiError::from_http_response("oauth2/token", 400, "invalid_grant");

    let message = err.to_string();

    assert!(message.contains("HTTP 400"));
    assert!(message.contains("invalid_grant"));
    assert!(message.contains("error.rs"), "location missing from: {message}");
}

#[test]
fn given_status_codes_when_categorized_then_retry_rules_apply() {
    assert!(ApiError::from_http_response("x", 503, "").is_retryable());
    assert!(ApiError::from_http_response("x", 429, "").is_retryable());
    assert!(!ApiError::from_http_response("x", 400, "").is_retryable());
    assert!(!ApiError::schema("x", "missing field").is_retryable());

    assert_eq!(ApiError::from_http_response("x", 401, "").error_category(), "auth_rejected");
    assert_eq!(ApiError::from_http_response("x", 500, "").error_category(), "server_error");
    assert_eq!(ApiError::schema("x", "bad").error_category(), "schema");
}

/// **VALUE**: Wrapped failures keep the backend error as their source.
#[test]
fn given_logout_error_when_inspected_then_source_is_api_error() {
    let err = SessionError::logout(ApiError::from_http_response("oauth2/logout", 502, "bad gateway"));

    let source = err.source().expect("source");

    assert!(source.to_string().contains("HTTP 502"));
}

#[test]
fn given_not_authorized_when_formatted_then_names_state() {
    let err = SessionError::not_authorized(SessionState::Unknown);

    assert!(err.to_string().contains("state: unknown"));
}

#[test]
fn given_checkout_error_when_converted_then_core_error_is_transparent() {
    let err: CoreError = CheckoutError::invalid_redirect("ftp://x", "unsupported scheme 'ftp'").into();

    assert!(err.to_string().contains("Checkout Redirect Error"));
    assert!(err.to_string().contains("ftp://x"));
}

/// **VALUE**: A bad page or provider name says where it was rejected, like
/// every other error in the crate.
///
/// **BUG THIS CATCHES**: Would catch name parse errors losing their location,
/// or pointing into the error module instead of the parser.
#[test]
fn given_unknown_names_when_parsed_then_error_carries_parser_location() {
    let page_err = "Checkout".parse::<Page>().expect_err("unknown page");
    let provider_err = "Myspace".parse::<IdentityProvider>().expect_err("unknown provider");

    assert!(page_err.to_string().contains("Unknown page: 'Checkout'"));
    assert!(page_err.location.file.ends_with("mod.rs"));
    assert!(page_err.location.file.contains("router"), "{}", page_err.location);
    assert!(page_err.to_string().contains(&page_err.location.to_string()));

    assert!(provider_err.to_string().contains("Unknown identity provider"));
    assert!(provider_err.location.file.contains("session"), "{}", provider_err.location);
}
