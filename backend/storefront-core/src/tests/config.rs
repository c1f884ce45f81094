// Unit tests for config validation and defaults

use crate::config::StorefrontConfig;
use crate::error::ConfigError;
use crate::session::IdentityProvider;

use std::time::Duration;

#[test]
fn given_defaults_when_validated_then_ok() {
    let config = StorefrontConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.login.default_provider, IdentityProvider::Facebook);
}

/// **VALUE**: A typo in the endpoint must fail at startup, not on the first
/// token exchange.
#[test]
fn given_non_http_endpoint_when_validated_then_rejected() {
    let config = StorefrontConfig::with_urls("ftp://api.test", "https://shop.test");

    let result = config.validate();

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_out_of_range_timeout_when_validated_then_rejected() {
    let mut config = StorefrontConfig::default();
    config.http.request_timeout_secs = 0;

    let err = config.validate().expect_err("zero timeout");

    assert!(err.to_string().contains("Invalid request timeout"));
}

#[test]
fn given_empty_base_url_when_validated_then_rejected() {
    let config = StorefrontConfig::with_urls("https://api.test", "");

    let err = config.validate().expect_err("empty base url");

    assert!(err.to_string().contains("base_url cannot be empty"));
}
