//! Storage Module
//!
//! Text key-value backends that hold the persisted feed cache.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

// == Public Constants ==
/// Maximum allowed value size in bytes for the in-memory backend
pub const MAX_VALUE_SIZE: usize = 5 * 1024 * 1024; // 5 MB

/// Fallible get/set of text values by key.
///
/// Implementations report an unreachable medium as an error and a missing
/// key as `Ok(None)`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
