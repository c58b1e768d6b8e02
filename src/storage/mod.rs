use std::{
    io,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub mod json_file;
pub mod memory;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("couldn't access the storage file `{path:?}`: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("couldn't serialize the value of `{key}`: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// A string key-value store with the semantics of the browser's local storage
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    /// # Errors
    /// Returns an error if the new contents couldn't be written out
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    /// # Errors
    /// Returns an error if the new contents couldn't be written out
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

pub type SharedStorage<S> = Arc<Mutex<S>>;

/// Reads a whole list stored under `key`. A missing or malformed value is an empty list.
pub fn load_snapshot<T, S>(storage: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    match storage.get_item(key) {
        None => Vec::new(),
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(
                "The value stored under `{}` isn't a valid list, treating it as empty. Details: {}",
                key, error
            );
            Vec::new()
        }),
    }
}

/// Replaces the list stored under `key` with `items`
pub fn save_snapshot<T, S>(storage: &mut S, key: &str, items: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    S: Storage + ?Sized,
{
    let raw = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
        key: key.into(),
        source,
    })?;
    storage.set_item(key, raw)
}
