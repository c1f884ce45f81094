//! Errors from calls to the storefront backend.
//!
//! Every variant counts as a network failure for the fail-closed rules:
//! callers resolve to the nearest safe default (unauthorized, unchanged
//! cart, no navigation) and log the error rather than propagate a crash.
//!
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` uses status codes and transport flags, not message content
//! - Response bodies that do not match the endpoint schema are `Schema`

use common::{ErrorLocation, HttpStatusCode};
use std::panic::Location;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("HTTP Error from '{endpoint}': HTTP {status_code} - {message} {location}")]
    Http {
        endpoint: String,
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error for '{endpoint}': {message} {location}")]
    Network {
        endpoint: String,
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Schema Error from '{endpoint}': {message} {location}")]
    Schema {
        endpoint: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(endpoint: impl Into<String>, error: &reqwest::Error) -> Self {
        let endpoint = endpoint.into();

        // Body decoding failures mean the server answered with the wrong shape
        if error.is_decode() {
            return ApiError::Schema {
                endpoint,
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if let Some(status) = error.status() {
            return ApiError::Http {
                endpoint,
                status_code: HttpStatusCode(status.as_u16()),
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        ApiError::Network {
            endpoint,
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a non-2xx response.
    #[track_caller]
    pub fn from_http_response(
        endpoint: impl Into<String>,
        status_code: u16,
        body: impl Into<String>,
    ) -> Self {
        ApiError::Http {
            endpoint: endpoint.into(),
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn schema(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Schema {
            endpoint: endpoint.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Transient failures worth another attempt on idempotent requests.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,
            ApiError::Http { status_code, .. } => status_code.is_retryable(),
            ApiError::Schema { .. } => false,
            ApiError::UrlParse { .. } => false,
        }
    }

    /// Get error category for log fields.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::Http { status_code, .. } if status_code.is_auth_rejection() => "auth_rejected",
            ApiError::Http { status_code, .. } if status_code.is_client_error() => "client_error",
            ApiError::Http { status_code, .. } if status_code.is_server_error() => "server_error",
            ApiError::Http { .. } => "http",
            ApiError::Network {
                is_timeout: true, ..
            } => "timeout",
            ApiError::Network {
                is_connection: true,
                ..
            } => "connection",
            ApiError::Network { .. } => "network",
            ApiError::Schema { .. } => "schema",
            ApiError::UrlParse { .. } => "url_parse",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
