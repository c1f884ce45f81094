// Unit tests for RedactedToken: no leak through Debug, Display or serde

use crate::RedactedToken;

/// **VALUE**: Authorization codes end up inside structs that are `{:?}`-logged.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug sneaking the raw code
/// into log files.
#[test]
fn given_token_when_debug_formatted_then_value_is_hidden() {
    // GIVEN: A token with a recognisable value
    let token = RedactedToken::new("auth-code-123");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{token:?}");
    let display = format!("{token}");

    // THEN: Neither contains the raw value
    assert!(!debug.contains("auth-code-123"));
    assert!(!display.contains("auth-code-123"));
    assert!(debug.contains("13 chars"));
}

#[test]
fn given_token_when_serialized_then_refuses() {
    let token = RedactedToken::new("access-token");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "RedactedToken must not serialize");
}

#[test]
fn given_whitespace_token_when_checked_then_is_empty() {
    assert!(RedactedToken::new("   ").is_empty());
    assert!(!RedactedToken::new("x").is_empty());
    assert_eq!(RedactedToken::new("abc").expose(), "abc");
}
