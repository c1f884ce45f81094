use crate::error::api::ApiError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CheckoutError {
    #[error("Checkout Submit Error: {source} {location}")]
    Submit {
        #[source]
        source: ApiError,
        location: ErrorLocation,
    },

    #[error("Checkout Redirect Error: '{url}' is not a navigable address: {reason} {location}")]
    InvalidRedirect {
        url: String,
        reason: String,
        location: ErrorLocation,
    },
}

impl CheckoutError {
    #[track_caller]
    pub fn submit(source: ApiError) -> Self {
        CheckoutError::Submit {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_redirect(url: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckoutError::InvalidRedirect {
            url: url.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
