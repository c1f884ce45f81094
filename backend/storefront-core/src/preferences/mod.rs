//! Key-value persistence that survives reloads.
//!
//! The storefront only keeps the last viewed page here, but the store is a
//! plain string map so the router does not own its format.

use crate::error::preferences::PreferenceError;

use common::ErrorLocation;

use std::collections::BTreeMap;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, info, warn};

const PREFERENCES_FILE_NAME: &str = "preferences.json";
const PREFERENCES_DIR_NAME: &str = "storefront";

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

/// Store that lives as long as the process. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// JSON map persisted at `{dir}/preferences.json`.
///
/// Every write rewrites the whole file through a temp file and rename, so a
/// crash leaves either the old or the new map on disk.
#[derive(Debug)]
pub struct FilePreferenceStore {
    dir: PathBuf,
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(PREFERENCES_FILE_NAME);
        Self {
            dir,
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Store under the platform data directory (`~/.local/share/storefront` on Linux).
    pub fn in_default_dir() -> Result<Self, PreferenceError> {
        let dir = dirs::data_local_dir()
            .map(|dir| dir.join(PREFERENCES_DIR_NAME))
            .ok_or_else(|| PreferenceError::Unavailable {
                location: ErrorLocation::from(Location::caller()),
                reason: "Cannot determine platform data directory".to_string(),
            })?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            debug!("No preferences file at {}", self.path.display());
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| PreferenceError::Read {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            warn!("Preferences file {} is corrupt: {}", self.path.display(), e);
            PreferenceError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| PreferenceError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: self.dir.clone(),
            source: e,
        })?;

        let json = serde_json::to_string_pretty(values).map_err(|e| PreferenceError::Serialize {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        let temp_path = self.dir.join(format!("{}.tmp", PREFERENCES_FILE_NAME));
        std::fs::write(&temp_path, json).map_err(|e| PreferenceError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| PreferenceError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // A corrupt file is replaced rather than blocking every future write
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(PreferenceError::Parse { .. }) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        apply(&mut values);
        self.write_all(&values)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })?;
        info!("Preference '{}' saved to {}", key, self.path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
