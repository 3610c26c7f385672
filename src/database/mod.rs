//! Persistence collaborator: a key-value store holding serialized blobs.

pub mod db;
pub mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Minimal key-value boundary the repository persists through.
pub trait KeyValueStore {
    /// Returns the blob stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores `blob` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, blob: &str) -> Result<()>;

    /// Deletes the blob under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
