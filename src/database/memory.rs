//! In-process store, used by tests and by callers that bring their own persistence.
use super::KeyValueStore;
use crate::error::Result;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one blob, e.g. to simulate data from a previous run.
    pub fn with_entry(key: &str, blob: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), blob.to_string());
        store
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<()> {
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
