// Unit tests for ErrorLocation capture and formatting

use crate::ErrorLocation;

use std::panic::Location;

#[track_caller]
fn capture_through_helper() -> ErrorLocation {
    ErrorLocation::caller()
}

/// **VALUE**: Verifies the Display format that every error message embeds.
///
/// **BUG THIS CATCHES**: Would catch a format change that breaks log greps for
/// `[file:line:column]`.
#[test]
fn given_location_when_displayed_then_uses_bracketed_file_line_column() {
    // GIVEN: A location captured here
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting it
    let rendered = location.to_string();

    // THEN: Should be [file:line:column]
    assert!(rendered.starts_with('['));
    assert!(rendered.ends_with(']'));
    assert!(rendered.contains("error_location.rs"));
    assert!(rendered.contains(&format!(":{}:", location.line)));
}

/// **VALUE**: `caller()` must report the call site, not the helper body.
///
/// **WHY THIS MATTERS**: Error constructors are `#[track_caller]`; if the
/// location pointed inside the constructor every error would share one line.
#[test]
fn given_track_caller_helper_when_capturing_then_reports_call_site() {
    // GIVEN: The line we call from
    let expected_line = line!() + 3;

    // WHEN: Capturing through a #[track_caller] helper
    let location = capture_through_helper();

    // THEN: Line matches the call site
    assert_eq!(location.line, expected_line);
}

#[test]
fn given_location_when_serialized_then_exposes_fields() {
    let location = ErrorLocation::from(Location::caller());

    let json = serde_json::to_value(location).unwrap();

    assert_eq!(json["line"], location.line);
    assert_eq!(json["column"], location.column);
    assert!(json["file"].as_str().unwrap().contains("error_location.rs"));
}
