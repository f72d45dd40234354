use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::KeyValueStore;

/// Process local store, nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.values.get(key).map(|val| return val.to_string()));
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        return Ok(());
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.values.remove(key);
        return Ok(());
    }
}
