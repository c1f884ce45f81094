//! Logging for the storefront shell.
//!
//! Dual output: colored stderr (stdout carries command output) plus a plain
//! log file. Initialization is thread-safe and runs at most once.

use crate::error::StorefrontAppError;

use std::fs::File;
use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();

static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

const LOG_FILE_NAME: &str = "storefront.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Default level for debug builds.
#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default level for release builds.
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Initialize the logger with dual output (stderr + file).
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or another global
/// logger is already installed.
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), StorefrontAppError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, level);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{level:?}");
        }
    });

    result
}

/// Open (append) `{log_dir}/storefront.log`, creating the directory.
#[track_caller]
pub(crate) fn open_log_file(log_dir: &Path) -> Result<File, StorefrontAppError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        StorefrontAppError::storefront(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;

    fern::log_file(log_dir.join(LOG_FILE_NAME))
        .map_err(|e| StorefrontAppError::storefront(format!("Failed to create log file: {e}")))
}

#[track_caller]
fn initialize_internal(log_dir: &Path, level: LevelFilter) -> Result<(), StorefrontAppError> {
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    // Dependencies stay at warn unless the user asked for trace
    let base_dispatch = Dispatch::new()
        .level(level.min(LevelFilter::Warn))
        .level_for("storefront", level)
        .level_for("storefront_core", level);

    let stderr_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stderr());

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level} - {target}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                target = record.target(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(open_log_file(log_dir)?);

    base_dispatch
        .chain(stderr_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| StorefrontAppError::storefront(format!("Failed to initialize logger: {e}")))?;

    Ok(())
}
