//! Memory Store Module
//!
//! In-process key-value storage with a per-value size quota.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::storage::{KeyValueStore, MAX_VALUE_SIZE};

// == Memory Store ==
/// HashMap-backed store.
///
/// Values larger than the quota are rejected with `QuotaExceeded`, leaving the
/// previous value in place.
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: Mutex<HashMap<String, String>>,
    /// Largest value accepted, in bytes
    max_value_size: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store with the default quota.
    pub fn new() -> Self {
        Self::with_quota(MAX_VALUE_SIZE)
    }

    /// Creates an empty store that rejects values above `max_value_size` bytes.
    pub fn with_quota(max_value_size: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_value_size,
        }
    }

    // == Length ==
    /// Returns the current number of keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    // == Is Empty ==
    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.len() > self.max_value_size {
            return Err(StoreError::QuotaExceeded {
                size: value.len(),
                limit: self.max_value_size,
            });
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
