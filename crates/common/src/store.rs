use async_trait::async_trait;
use eyre::Result;

use crate::target::TargetRecord;

/// Storage verbs the bootstrap operations need. `database` implements this
/// over MongoDB; tests implement it over a map.
#[async_trait]
pub trait SetupStore: Send + Sync {
    /// Names of the collections currently present in the database.
    async fn collection_names(&self) -> Result<Vec<String>>;

    /// Create a collection. Returns `false` when it already existed; that is
    /// not an error.
    async fn create_collection(&self, name: &str) -> Result<bool>;

    /// Append a watch-target record to the contracts collection.
    async fn insert_target(&self, record: &TargetRecord) -> Result<()>;

    /// All watch-target records currently stored.
    async fn find_targets(&self) -> Result<Vec<TargetRecord>>;

    /// Drop a collection. Returns `false` when it did not exist.
    async fn drop_collection(&self, name: &str) -> Result<bool>;
}
