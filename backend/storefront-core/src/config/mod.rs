use crate::error::config::ConfigError;
use crate::session::IdentityProvider;
use crate::{DEFAULT_BASE_URL, DEFAULT_ENDPOINT_URL};

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "storefront.json";
const CONFIG_DIR_NAME: &str = "storefront";
const CONFIG_VERSION: u32 = 1;

pub const ENDPOINT_URL_ENV: &str = "STOREFRONT_ENDPOINT_URL";
pub const BASE_URL_ENV: &str = "STOREFRONT_BASE_URL";

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

// ============================================
// CONFIG STRUCTS
// ============================================

/// Where the storefront backend lives and where it should send the browser back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Backend API root (token exchange, validation, checkout, catalog).
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    /// Storefront address used as OAuth redirect and checkout return address.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Retry budget for idempotent catalog reads. Zero disables retries.
    #[serde(default = "default_catalog_retry_secs")]
    pub catalog_retry_max_elapsed_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            catalog_retry_max_elapsed_secs: default_catalog_retry_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginConfig {
    #[serde(default)]
    pub default_provider: IdentityProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub login: LoginConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            endpoint: EndpointConfig::default(),
            http: HttpConfig::default(),
            login: LoginConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_catalog_retry_secs() -> u64 {
    10
}

// ============================================
// IMPLEMENTATION
// ============================================

impl StorefrontConfig {
    /// Build a config pointing at explicit addresses, other settings default.
    pub fn with_urls(endpoint_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            endpoint: EndpointConfig {
                endpoint_url: endpoint_url.into(),
                base_url: base_url.into(),
            },
            ..Self::default()
        }
    }

    /// Platform config directory (`~/.config/storefront` on Linux).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| ConfigError::DirectoryNotFound {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Load config from {config_dir}/storefront.json.
    ///
    /// Returns defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(config_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file, then let `.env` and the process environment override
    /// the endpoint and base addresses.
    ///
    /// Validation runs once, after the overrides, so an override can replace
    /// a bad address in the file.
    pub fn load_with_env(config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(config_dir)?;

        if !try_load_dotenv() {
            debug!("No .env file found - using process environment only");
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Replace addresses with `STOREFRONT_ENDPOINT_URL` / `STOREFRONT_BASE_URL` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = read_env(ENDPOINT_URL_ENV) {
            info!("Endpoint URL overridden by {ENDPOINT_URL_ENV}");
            self.endpoint.endpoint_url = value;
        }
        if let Some(value) = read_env(BASE_URL_ENV) {
            info!("Base URL overridden by {BASE_URL_ENV}");
            self.endpoint.base_url = value;
        }
    }

    /// Save config to {config_dir}/storefront.json using temp file + rename.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        validate_http_url("endpoint_url", &self.endpoint.endpoint_url)?;
        validate_http_url("base_url", &self.endpoint.base_url)?;

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.http.request_timeout_secs) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid request timeout: {}s (must be {}-{})",
                    self.http.request_timeout_secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    /// Parse {config_dir}/storefront.json without validating values.
    fn read_file(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: StorefrontConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        info!("Config read from {}", config_path.display());
        Ok(config)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        parse_http_url("endpoint_url", &self.endpoint.endpoint_url)
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_http_url("base_url", &self.endpoint.base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.request_timeout_secs)
    }

    pub fn catalog_retry_budget(&self) -> Duration {
        Duration::from_secs(self.http.catalog_retry_max_elapsed_secs)
    }
}

#[track_caller]
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    parse_http_url(field, value).map(|_| ())
}

#[track_caller]
fn parse_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("{field} cannot be empty string"),
        });
    }

    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("Invalid URL for {field}: {value} ({e})"),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid URL scheme for {field}: {value}"),
        });
    }

    Ok(url)
}

fn read_env(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => None,
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(_)) => {
            warn!("Env var {} contains invalid unicode, ignoring", key);
            None
        }
    }
}

/// Attempts to load .env from the working directory, then next to the executable.
fn try_load_dotenv() -> bool {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return true;
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                match dotenvy::from_path(&env_path) {
                    Ok(_) => {
                        info!("Loaded .env from: {:?}", env_path);
                        return true;
                    }
                    Err(e) => {
                        warn!("Failed to parse .env at {:?}: {}", env_path, e);
                    }
                }
            }
        }
    }

    false
}
