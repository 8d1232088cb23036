use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ItemStore, StoreError};
use crate::v1::item::Item;

/// In-memory store, the substitute capability for exercising the
/// dispatcher without a live table.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_items(items: Vec<Item>) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().expect("fresh lock");
            for item in items {
                if let Some(id) = item.id() {
                    let id = id.to_string();
                    inner.insert(id, item);
                }
            }
        }
        store
    }
    fn lock(&self) -> Result<std::sync::MutexGuard<HashMap<String, Item>>, StoreError> {
        self.inner
            .lock()
            .map_err(|err| StoreError::LockFail(err.to_string()))
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn put(&self, item: Item) -> Result<(), StoreError> {
        // Like the managed table, a record without its key field is rejected.
        let id = item
            .id()
            .map(str::to_string)
            .ok_or_else(|| StoreError::PutFail("item has no id field".to_string()))?;
        self.lock()?.insert(id, item);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        // Silent no-op on missing keys.
        self.lock()?.remove(id);
        Ok(())
    }
}
