// Unit tests for logger module initialization logic
// Tests focus on idempotency and error handling

use crate::logger::{initialize, open_log_file};

use log::LevelFilter;
use std::path::PathBuf;
use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Every subcommand path initializes logging; tests and
/// embedders may do it again. fern panics on a second global logger.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable temporary directory
    let dir = TempDir::new().expect("temp dir");

    // WHEN: Calling initialize twice
    let first = initialize(dir.path(), LevelFilter::Debug);
    let second = initialize(dir.path(), LevelFilter::Debug);

    // THEN: Second call is a no-op returning Ok
    assert!(second.is_ok(), "Second initialization should succeed (idempotent)");
    drop(first);
}

/// **VALUE**: An unwritable log location is an error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped.
#[test]
fn given_invalid_log_dir_when_opening_log_file_then_returns_error() {
    // GIVEN: A path below a character device
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Opening the log file there
    let result = open_log_file(&invalid_dir);

    // THEN: Storefront error variant
    let err = result.expect_err("Should fail for invalid log directory");
    assert!(format!("{err:?}").contains("Storefront"));
}

#[test]
fn given_missing_nested_dir_when_opening_log_file_then_created() {
    let dir = TempDir::new().expect("temp dir");
    let nested = dir.path().join("a").join("b");

    open_log_file(&nested).expect("log file");

    assert!(nested.join("storefront.log").exists());
}
