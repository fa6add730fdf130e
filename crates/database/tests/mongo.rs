//! End-to-end pass against a live MongoDB deployment.
//!
//! Ignored by default; run with a server available:
//!
//! ```text
//! MONGODB_URI=mongodb://127.0.0.1:27017 cargo test -p database -- --ignored
//! ```

use bootstrap::ops::{initialize, reset, verify};
use common::db::collections::CONTRACTS;
use common::store::SetupStore;
use common::target::{defaults, WatchTarget};
use database::client::DbClient;
use database::connect::connect;
use eyre::Result;

const TEST_DB: &str = "watcher_setup_test";

#[tokio::test]
#[ignore = "needs a running MongoDB deployment"]
async fn provisions_and_verifies_a_live_deployment() -> Result<()> {
    let url =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_owned());
    let client = connect(&url).await?;
    let store = DbClient::new(&client, TEST_DB);

    // Clean slate, whatever an earlier run left behind.
    reset(&store).await?;

    let target = WatchTarget::parse(
        defaults::CHAIN_ENDPOINT,
        defaults::CONTRACT_ADDRESS,
        defaults::EVENT_TYPE,
    )?;

    let outcome = initialize(&store, &target).await?;
    assert!(outcome.seeded);
    assert_eq!(outcome.created.len(), 2);

    let second = initialize(&store, &target).await?;
    assert!(second.already_provisioned());

    let report = verify(&store, &target).await?;
    assert!(report.satisfied(), "report: {report:?}");

    // Creating a collection that exists reports `false`, not an error.
    assert!(!store.create_collection(CONTRACTS).await?);

    reset(&store).await?;
    assert!(!verify(&store, &target).await?.satisfied());

    Ok(())
}
