use async_trait::async_trait;
use dashmap::DashMap;

use super::{KeyValueStore, Result};

/// An in-memory [KeyValueStore], used by tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
