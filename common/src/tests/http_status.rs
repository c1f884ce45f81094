// Unit tests for status categorisation

use crate::HttpStatusCode;

/// **VALUE**: Only gateway failures and throttling are worth retrying.
///
/// **BUG THIS CATCHES**: Would catch a blanket "all 5xx" rule retrying a 500
/// from a handler that already half-applied a change.
#[test]
fn given_status_codes_when_checked_then_retry_set_is_narrow() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should retry");
    }
    for code in [200, 400, 401, 404, 500] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not retry");
    }
}

#[test]
fn given_status_codes_when_classified_then_ranges_match() {
    assert!(HttpStatusCode::from(204).is_success());
    assert!(HttpStatusCode(403).is_auth_rejection());
    assert!(HttpStatusCode(418).is_client_error());
    assert!(HttpStatusCode(500).is_server_error());
    assert_eq!(HttpStatusCode(503).to_string(), "503");
}
