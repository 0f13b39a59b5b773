// core/src/local_storage.rs

//! String-keyed JSON storage mirroring the browser's `localStorage`: each key holds one
//! JSON document, and the storefront only ever uses append-only arrays.

use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{StorefrontError, StorefrontResult};

pub const ORDERS_KEY: &str = "autoparts-orders";
pub const CONTACT_SUBMISSIONS_KEY: &str = "contact-submissions";

enum Backend {
  Memory(RwLock<HashMap<String, String>>),
  /// One `<key>.json` file per key.
  Directory(PathBuf),
}

pub struct LocalStorage {
  backend: Backend,
  // Serializes read-modify-write appends.
  append_lock: Mutex<()>,
}

impl LocalStorage {
  pub fn in_memory() -> Self {
    Self {
      backend: Backend::Memory(RwLock::new(HashMap::new())),
      append_lock: Mutex::new(()),
    }
  }

  pub fn in_directory(dir: impl Into<PathBuf>) -> StorefrontResult<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir)?;
    Ok(Self {
      backend: Backend::Directory(dir),
      append_lock: Mutex::new(()),
    })
  }

  pub fn get_item(&self, key: &str) -> StorefrontResult<Option<String>> {
    check_key(key)?;
    match &self.backend {
      Backend::Memory(map) => Ok(map.read().get(key).cloned()),
      Backend::Directory(dir) => match fs::read_to_string(dir.join(format!("{}.json", key))) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
      },
    }
  }

  pub fn set_item(&self, key: &str, value: String) -> StorefrontResult<()> {
    check_key(key)?;
    match &self.backend {
      Backend::Memory(map) => {
        map.write().insert(key.to_string(), value);
        Ok(())
      }
      Backend::Directory(dir) => {
        // Write-then-rename: readers never observe a partially written list.
        let target = dir.join(format!("{}.json", key));
        let staging = dir.join(format!("{}.json.tmp", key));
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
      }
    }
  }

  /// The array stored under `key`; a missing key reads as an empty list.
  pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> StorefrontResult<Vec<T>> {
    match self.get_item(key)? {
      None => Ok(Vec::new()),
      Some(raw) => serde_json::from_str(&raw).map_err(|e| StorefrontError::Storage {
        key: key.to_string(),
        message: format!("stored value is not a readable list: {}", e),
      }),
    }
  }

  /// Appends `record` to the array under `key` and returns the new length.
  pub fn append<T: Serialize>(&self, key: &str, record: &T) -> StorefrontResult<usize> {
    let value = serde_json::to_value(record)?;
    let _guard = self.append_lock.lock();
    let mut list: Vec<Value> = self.read_list(key)?;
    list.push(value);
    self.set_item(key, serde_json::to_string(&list)?)?;
    debug!(key, len = list.len(), "Appended record to local storage");
    Ok(list.len())
  }
}

fn check_key(key: &str) -> StorefrontResult<()> {
  let valid = !key.is_empty()
    && key
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
  if valid {
    Ok(())
  } else {
    Err(StorefrontError::Storage {
      key: key.to_string(),
      message: "keys may only contain ASCII letters, digits, '-' and '_'".to_string(),
    })
  }
}
