use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use common::db::collections::CONTRACTS;
use common::store::SetupStore;
use common::target::TargetRecord;
use eyre::Result;

/// In-memory stand-in for the MongoDB store: collection name to records.
/// Only the contracts collection ever holds records, like the real layout.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<TargetRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fabricate pre-existing state without going through the operations.
    pub fn put_raw(&self, collection: &str, record: TargetRecord) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_owned())
            .or_default()
            .push(record);
    }
}

#[async_trait]
impl SetupStore for MemoryStore {
    async fn collection_names(&self) -> Result<Vec<String>> {
        Ok(self.collections.lock().unwrap().keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str) -> Result<bool> {
        let mut map = self.collections.lock().unwrap();
        if map.contains_key(name) {
            return Ok(false);
        }
        map.insert(name.to_owned(), Vec::new());
        Ok(true)
    }

    async fn insert_target(&self, record: &TargetRecord) -> Result<()> {
        // Like MongoDB, inserting creates the collection implicitly.
        self.collections
            .lock()
            .unwrap()
            .entry(CONTRACTS.to_owned())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn find_targets(&self) -> Result<Vec<TargetRecord>> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(CONTRACTS)
            .cloned()
            .unwrap_or_default())
    }

    async fn drop_collection(&self, name: &str) -> Result<bool> {
        Ok(self.collections.lock().unwrap().remove(name).is_some())
    }
}
