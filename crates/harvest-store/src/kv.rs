//! Directory-backed store with automatic serialization.

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::StoreError;

/// Environment variable overriding the default store location.
pub const HOME_ENV: &str = "HARVEST_HOME";

/// Typed store keeping one JSON file per key.
///
/// Keys must be simple names; anything that looks like a path is rejected.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Open {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Open the store at its default location.
    ///
    /// Resolves `$HARVEST_HOME` if set, otherwise `~/.local/share/harvest`,
    /// with `/tmp/harvest` as the last resort on stripped-down systems.
    pub fn open_default() -> Result<Self, StoreError> {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return Self::open(PathBuf::from(dir));
        }
        let base = if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".local").join("share")
        } else {
            PathBuf::from("/tmp")
        };
        Self::open(base.join("harvest"))
    }

    /// The directory this store lives in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get a value.
    ///
    /// Returns `None` if the key was never set.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Operation {
                    key: key.to_string(),
                    source,
                })
            }
        };
        let value: T = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    /// Set a value, replacing any previous one.
    ///
    /// The value lands in a temp file first and is renamed into place, so
    /// readers only ever see a complete JSON document.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec(value)?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        let write = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, &path));
        write.map_err(|source| StoreError::Operation {
            key: key.to_string(),
            source,
        })
    }

    /// Remove a key. Removing a key that was never set is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Operation {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Check if a key is set.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(key)?.exists())
    }

    /// List all set keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Open {
            path: self.dir.clone(),
            source,
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Open {
                path: self.dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(key) = name.strip_suffix(".json") {
                if !key.starts_with('.') {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key.contains("..")
            || key.starts_with('.')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}
