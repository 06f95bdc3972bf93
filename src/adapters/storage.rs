use crate::core::Storage;
use crate::utils::error::{CartError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// File-backed key-value storage: one JSON file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    /// File a key is stored in. Bytes outside `[A-Za-z0-9-]` are written as `_XX` hex,
    /// so distinct keys never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_name.push(char::from(byte));
            } else {
                file_name.push_str(&format!("_{:02X}", byte));
            }
        }
        file_name.push_str(".json");
        Path::new(&self.base_path).join(file_name)
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.path_for(key);
        match fs::read_to_string(&full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // The value goes to a temp file in the same directory and is renamed over the
    // target, so readers see either the old or the new value, never a truncated one.
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key);
        let parent = full_path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(value.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&full_path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items.lock().map_err(|_| CartError::StorageError {
            message: "memory storage lock poisoned".to_string(),
        })
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
