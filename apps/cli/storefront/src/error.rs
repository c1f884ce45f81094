use common::ErrorLocation;

use storefront_core::error::{CheckoutError, CoreError, SessionError};

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the command-line shell.
///
/// Core errors are flattened to their message so the whole enum stays
/// serializable for `--json` output. The location is where the shell
/// received the error.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum StorefrontAppError {
    /// Error from this App
    #[error("Storefront Error: {message} {location}")]
    Storefront {
        message: String,
        location: ErrorLocation,
    },

    /// Error from storefront-core (config, backend, preferences)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Logout rejected or failed
    #[error("Session Error: {message} {location}")]
    Session {
        message: String,
        location: ErrorLocation,
    },

    /// Checkout could not be started
    #[error("Checkout Error: {message} {location}")]
    Checkout {
        message: String,
        location: ErrorLocation,
    },

    /// A product named on the command line cannot be bought
    #[error("Product Error: {message} {location}")]
    Product {
        message: String,
        location: ErrorLocation,
    },
}

impl StorefrontAppError {
    #[track_caller]
    pub fn storefront(message: impl Into<String>) -> Self {
        StorefrontAppError::Storefront {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn product(message: impl Into<String>) -> Self {
        StorefrontAppError::Product {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for StorefrontAppError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        StorefrontAppError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for StorefrontAppError {
    #[track_caller]
    fn from(error: SessionError) -> Self {
        StorefrontAppError::Session {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CheckoutError> for StorefrontAppError {
    #[track_caller]
    fn from(error: CheckoutError) -> Self {
        StorefrontAppError::Checkout {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
