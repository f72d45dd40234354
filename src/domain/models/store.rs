use anyhow::Result;
use async_trait::async_trait;

/// Persistent string storage keyed by name. Values are opaque, there is no
/// expiry and no structure beyond a bare string.
#[async_trait]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn clear(&self, key: &str) -> Result<()>;
}

pub type StoreBox = Box<dyn KeyValueStore + Send + Sync>;
