//! Shared building blocks for the storefront workspace.
//!
//! This crate holds the small pieces every other crate leans on: error
//! location capture, HTTP status categorisation and a wrapper for secrets
//! (authorization codes, access tokens) that must never reach a log line.
//!
//! ## Architecture
//!
//! - **common** (this crate): plumbing with no storefront semantics
//! - **storefront-core**: session, cart, checkout and routing logic
//! - **storefront**: command-line shell wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
