//! Durable key/value storage for session state.
//!
//! Values are plain strings; structured records are serialized to JSON by
//! the caller before being stored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ReporterError, Result};

/// Key holding the serialized signed-in user.
pub const USER_KEY: &str = "user";
/// Key holding the two-letter language code.
pub const LANGUAGE_KEY: &str = "language";

pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Storage backed by a JSON object on disk. Every mutation is written
/// through immediately.
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self {
                path,
                items: BTreeMap::new(),
            });
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| ReporterError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        let items = if contents.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&contents).map_err(|e| ReporterError::DataParse {
                path: path.clone(),
                source: e,
            })?
        };

        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ReporterError::FileWrite {
                path: self.path.clone(),
                source: e,
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.items)?;
        std::fs::write(&self.path, contents).map_err(|e| ReporterError::FileWrite {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Storage that lives only as long as the value.
#[derive(Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json")).unwrap();
        assert_eq!(storage.get_item(USER_KEY), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item(LANGUAGE_KEY, "ar").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item(LANGUAGE_KEY).as_deref(), Some("ar"));
    }

    #[test]
    fn test_remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item(USER_KEY, "{}").unwrap();
        storage.remove_item(USER_KEY).unwrap();
        storage.remove_item(USER_KEY).unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item(USER_KEY), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(ReporterError::DataParse { .. })
        ));
    }
}
