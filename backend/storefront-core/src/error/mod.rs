pub mod api;
pub mod checkout;
pub mod config;
pub mod preferences;
pub mod session;

pub use api::ApiError;
pub use checkout::CheckoutError;
pub use config::ConfigError;
pub use preferences::PreferenceError;
pub use session::SessionError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// A symbolic name (page, identity provider) that is not in its closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: '{value}' (expected one of: {expected}) {location}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
    pub location: ErrorLocation,
}

impl ParseNameError {
    #[track_caller]
    pub fn new(kind: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.into(),
            expected,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
