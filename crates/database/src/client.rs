use async_trait::async_trait;
use common::db::collections;
use common::store::SetupStore;
use common::target::TargetRecord;
use eyre::Result;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database};
use tracing::error;

/// Server error code returned when creating a collection that already exists.
const NAMESPACE_EXISTS: i32 = 48;

#[derive(Clone, Debug)]
pub struct DbClient {
    db: Database,
}

impl DbClient {
    pub fn new(client: &Client, db_name: &str) -> Self {
        Self {
            db: client.database(db_name),
        }
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    fn targets(&self) -> Collection<TargetRecord> {
        self.db.collection(collections::CONTRACTS)
    }
}

fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    matches!(*err.kind, ErrorKind::Command(ref e) if e.code == NAMESPACE_EXISTS)
}

#[async_trait]
impl SetupStore for DbClient {
    async fn collection_names(&self) -> Result<Vec<String>> {
        let names = self.db.list_collection_names().await.map_err(|e| {
            error!("Failed to list collections: {:?}", e);
            eyre::eyre!("Failed to list collections: {:?}", e)
        })?;
        Ok(names)
    }

    async fn create_collection(&self, name: &str) -> Result<bool> {
        match self.db.create_collection(name).await {
            Ok(()) => Ok(true),
            Err(e) if is_namespace_exists(&e) => Ok(false),
            Err(e) => {
                error!("Failed to create collection {}: {:?}", name, e);
                Err(eyre::eyre!("Failed to create collection {}: {:?}", name, e))
            }
        }
    }

    async fn insert_target(&self, record: &TargetRecord) -> Result<()> {
        self.targets().insert_one(record).await.map_err(|e| {
            error!("Failed to insert watch target: {:?}", e);
            eyre::eyre!("Failed to insert watch target: {:?}", e)
        })?;
        Ok(())
    }

    async fn find_targets(&self) -> Result<Vec<TargetRecord>> {
        let cursor = self.targets().find(doc! {}).await.map_err(|e| {
            error!("Failed to query watch targets: {:?}", e);
            eyre::eyre!("Failed to query watch targets: {:?}", e)
        })?;
        let records = cursor.try_collect().await.map_err(|e| {
            error!("Failed to read watch targets: {:?}", e);
            eyre::eyre!("Failed to read watch targets: {:?}", e)
        })?;
        Ok(records)
    }

    async fn drop_collection(&self, name: &str) -> Result<bool> {
        let existed = self.collection_names().await?.iter().any(|n| n == name);
        if !existed {
            return Ok(false);
        }
        self.db
            .collection::<Document>(name)
            .drop()
            .await
            .map_err(|e| {
                error!("Failed to drop collection {}: {:?}", name, e);
                eyre::eyre!("Failed to drop collection {}: {:?}", name, e)
            })?;
        Ok(true)
    }
}
