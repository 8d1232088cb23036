use async_trait::async_trait;
use thiserror::Error;

use super::item::Item;

pub mod dynamo;
pub mod memory;

/// The external key-value collection capability backing all item state.
/// Constructed once at process start and handed to the dispatcher by
/// reference; implementations must be shareable across invocations.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn scan(&self) -> Result<Vec<Item>, StoreError>;
    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError>;
    async fn put(&self, item: Item) -> Result<(), StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Scan failed: {0}")]
    ScanFail(String),
    #[error("Get failed: {0}")]
    GetFail(String),
    #[error("Put failed: {0}")]
    PutFail(String),
    #[error("Delete failed: {0}")]
    DeleteFail(String),
    #[error("LockFail: {0}")]
    LockFail(String),
    #[error("Unsupported attribute encoding: {0}")]
    Encoding(String),
}
