use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use super::{Storage, StorageError};

/// Storage kept in a single JSON object on disk. Every write rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Opens the storage file. A missing file is an empty storage, and so is a malformed one
    /// (it will be overwritten by the next write).
    ///
    /// # Errors
    /// Returns an error if the file exists but couldn't be read
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|error| {
                warn!(
                    "Storage file `{:?}` is poorly formatted, starting with an empty storage. \
                    Details: {}",
                    path, error
                );
                BTreeMap::new()
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("Storage file `{:?}` doesn't exist yet", path);
                BTreeMap::new()
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let contents =
            serde_json::to_string_pretty(&self.items).map_err(|source| StorageError::Serialize {
                key: "*".into(),
                source,
            })?;
        fs::write(&self.path, contents).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Storage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.insert(key.into(), value);
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_some() {
            self.flush()
        } else {
            Ok(())
        }
    }
}
