use storefront_core::config::{BASE_URL_ENV, ENDPOINT_URL_ENV, StorefrontConfig};
use storefront_core::error::ConfigError;
use storefront_core::session::IdentityProvider;

use serial_test::serial;
use tempfile::TempDir;

/// Clears the override variables on drop so a failing test cannot leak them.
struct EnvGuard;

impl EnvGuard {
    fn set(key: &str, value: &str) -> Self {
        // SAFETY: tests touching the environment are #[serial]
        unsafe { std::env::set_var(key, value) };
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests touching the environment are #[serial]
        unsafe {
            std::env::remove_var(ENDPOINT_URL_ENV);
            std::env::remove_var(BASE_URL_ENV);
        }
    }
}

#[test]
fn given_missing_file_when_loaded_then_defaults() {
    let dir = TempDir::new().expect("temp dir");

    let config = StorefrontConfig::load(dir.path()).expect("defaults");

    assert_eq!(config.version, 1);
    assert_eq!(config.http.catalog_retry_max_elapsed_secs, 10);
}

/// **VALUE**: What is saved is what is loaded on the next start.
///
/// **BUG THIS CATCHES**: Would catch a field missing `#[serde(default)]`
/// handling or the temp file being left behind instead of renamed.
#[test]
fn given_saved_config_when_loaded_then_values_preserved() {
    let dir = TempDir::new().expect("temp dir");
    let mut config = StorefrontConfig::with_urls("https://api.shop.test", "https://shop.test");
    config.http.request_timeout_secs = 12;
    config.login.default_provider = IdentityProvider::Google;

    config.save(dir.path()).expect("save");
    let loaded = StorefrontConfig::load(dir.path()).expect("load");

    assert_eq!(loaded.endpoint.endpoint_url, "https://api.shop.test");
    assert_eq!(loaded.endpoint.base_url, "https://shop.test");
    assert_eq!(loaded.http.request_timeout_secs, 12);
    assert_eq!(loaded.login.default_provider, IdentityProvider::Google);
    assert!(!dir.path().join("storefront.json.tmp").exists());
}

#[test]
fn given_partial_file_when_loaded_then_missing_fields_default() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("storefront.json"),
        r#"{ "endpoint": { "endpoint_url": "https://api.shop.test" } }"#,
    )
    .expect("write");

    let config = StorefrontConfig::load(dir.path()).expect("load");

    assert_eq!(config.endpoint.endpoint_url, "https://api.shop.test");
    assert_eq!(config.endpoint.base_url, storefront_core::DEFAULT_BASE_URL);
    assert_eq!(config.http.request_timeout_secs, 30);
}

#[test]
fn given_corrupt_file_when_loaded_then_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("storefront.json"), "{ nope").expect("write");

    let result = StorefrontConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_invalid_url_in_file_when_loaded_then_validation_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("storefront.json"),
        r#"{ "endpoint": { "endpoint_url": "not a url" } }"#,
    )
    .expect("write");

    let result = StorefrontConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

/// **VALUE**: Deployment can repoint the storefront without editing files.
#[test]
#[serial]
fn given_env_overrides_when_loaded_with_env_then_env_wins() {
    let dir = TempDir::new().expect("temp dir");
    StorefrontConfig::with_urls("https://file.test", "https://file-shop.test")
        .save(dir.path())
        .expect("save");
    let _endpoint = EnvGuard::set(ENDPOINT_URL_ENV, "https://env-api.test");
    let _base = EnvGuard::set(BASE_URL_ENV, "https://env-shop.test");

    let config = StorefrontConfig::load_with_env(dir.path()).expect("load");

    assert_eq!(config.endpoint.endpoint_url, "https://env-api.test");
    assert_eq!(config.endpoint.base_url, "https://env-shop.test");
}

/// **VALUE**: An environment override repairs a bad address in the file.
///
/// **BUG THIS CATCHES**: Would catch the file being validated before the
/// overrides are applied, which rejects a config the environment fixes.
#[test]
#[serial]
fn given_bad_file_url_and_valid_env_override_when_loaded_with_env_then_override_used() {
    // GIVEN: A file with an unparsable endpoint and a valid override
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("storefront.json"),
        r#"{ "endpoint": { "endpoint_url": "not a url", "base_url": "https://shop.test" } }"#,
    )
    .expect("write");
    let _endpoint = EnvGuard::set(ENDPOINT_URL_ENV, "https://env-api.test");

    // WHEN: Loading with the environment applied
    let config = StorefrontConfig::load_with_env(dir.path()).expect("override should win");

    // THEN: The override replaced the bad value; plain load still rejects the file
    assert_eq!(config.endpoint.endpoint_url, "https://env-api.test");
    assert!(matches!(
        StorefrontConfig::load(dir.path()),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
#[serial]
fn given_invalid_env_override_when_loaded_with_env_then_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let _endpoint = EnvGuard::set(ENDPOINT_URL_ENV, "mailto:ops@shop.test");

    let result = StorefrontConfig::load_with_env(dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}
