/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable string key/value store backing the session and the CLI configuration.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Writes all entries together. Implementations that can persist them in
    /// one write override this; the fallback stops at the first failure.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }

        Ok(())
    }
}

pub fn default_config_file() -> Result<PathBuf, StorageError> {
    let mut config_dir = dirs::config_dir().ok_or(StorageError::NoConfigDir)?;
    config_dir.push("gearsync");
    config_dir.push("config.toml");
    Ok(config_dir)
}

/// Flat TOML table on disk. Every write rereads the file so keys written by
/// other handles are kept.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(default_config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| StorageError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(config_dir) = self.path.parent() {
            fs::create_dir_all(config_dir).map_err(io_error)?;
        }

        let contents = toml::to_string_pretty(values)?;
        fs::write(&self.path, contents).map_err(io_error)?;

        // holds the bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(io_error)?;
        }

        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }

        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut values = self.load()?;
        for (key, value) in entries {
            values.insert(key.to_string(), value.to_string());
        }

        self.save(&values)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values().remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut values = self.values();
        for (key, value) in entries {
            values.insert(key.to_string(), value.to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("gearsync-storage-{}-{}", name, std::process::id()));
        path.push("config.toml");
        path
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let path = temp_file("roundtrip");
        let storage = FileStorage::new(&path);

        assert_eq!(storage.get("token").unwrap(), None);

        storage.set("token", "abc").unwrap();
        storage.set("server", "http://localhost:8080/api").unwrap();
        assert_eq!(storage.get("token").unwrap(), Some("abc".to_string()));

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("server").unwrap(),
            Some("http://localhost:8080/api".to_string())
        );

        reopened.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
        assert!(storage.get("server").unwrap().is_some());

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let path = temp_file("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "token = [").unwrap();

        let err = FileStorage::new(&path).get("token").unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_file_storage_set_many() {
        let path = temp_file("set-many");
        let storage = FileStorage::new(&path);

        storage.set("server", "http://localhost:8080/api").unwrap();
        storage
            .set_many(&[("role", "ADMIN"), ("token", "t1")])
            .unwrap();

        let values = storage.load().unwrap();
        assert_eq!(values.get("role").map(String::as_str), Some("ADMIN"));
        assert_eq!(values.get("token").map(String::as_str), Some("t1"));
        assert!(values.contains_key("server"));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_file("mode");
        let storage = FileStorage::new(&path);
        storage.set("token", "abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set("role", "ADMIN").unwrap();
        assert_eq!(storage.get("role").unwrap(), Some("ADMIN".to_string()));
        storage.remove("role").unwrap();
        assert_eq!(storage.get("role").unwrap(), None);
    }
}
