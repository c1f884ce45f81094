//! Config and preference loading for the shell.

use crate::error::StorefrontAppError;

use storefront_core::config::StorefrontConfig;
use storefront_core::error::CoreError;
use storefront_core::preferences::FilePreferenceStore;

use std::path::Path;

/// Config from `config_dir` (platform default when `None`) with `.env` and
/// environment overrides applied.
pub fn load_config(config_dir: Option<&Path>) -> Result<StorefrontConfig, StorefrontAppError> {
    let config = match config_dir {
        Some(dir) => StorefrontConfig::load_with_env(dir),
        None => StorefrontConfig::default_dir()
            .and_then(|dir| StorefrontConfig::load_with_env(&dir)),
    }
    .map_err(CoreError::from)?;
    Ok(config)
}

/// Preference store in `data_dir` (platform default when `None`).
pub fn open_preferences(data_dir: Option<&Path>) -> Result<FilePreferenceStore, StorefrontAppError> {
    let store = match data_dir {
        Some(dir) => FilePreferenceStore::new(dir),
        None => FilePreferenceStore::in_default_dir().map_err(CoreError::from)?,
    };
    Ok(store)
}
