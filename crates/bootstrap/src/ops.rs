use common::db::BOOTSTRAP_COLLECTIONS;
use common::store::SetupStore;
use common::target::WatchTarget;
use eyre::{bail, Result};
use tracing::{info, warn};

use crate::report::{InitOutcome, StoreState, VerifyReport};

/// Create the bootstrap collections and seed the watch-target document.
///
/// Safe to re-run: existing collections are left alone and an already
/// stored equal target short-circuits. A stored target that differs from
/// the requested one aborts the run before anything is written.
pub async fn initialize<S: SetupStore + ?Sized>(
    store: &S,
    target: &WatchTarget,
) -> Result<InitOutcome> {
    let record = target.record();

    // Conflict check comes first: refusing the run must leave the store
    // exactly as it was, missing collections included.
    let stored = store.find_targets().await?;
    if stored.iter().any(|r| *r != record) {
        bail!(
            "Store already holds a different watch target; refusing to overwrite it (reset the store first)"
        );
    }

    let mut created = Vec::new();
    for name in BOOTSTRAP_COLLECTIONS {
        if store.create_collection(name).await? {
            info!("Created collection {}", name);
            created.push(name.to_owned());
        }
    }

    let seeded = if stored.is_empty() {
        store.insert_target(&record).await?;
        info!("Seeded watch target for contract {}", target.contract_address);
        true
    } else {
        info!("Watch target already seeded; nothing to do");
        false
    };

    Ok(InitOutcome { created, seeded })
}

/// Check the provisioned-store property against the expected target.
///
/// Never fails just because the property does not hold; callers read the
/// report. Errors are reserved for the store itself failing.
pub async fn verify<S: SetupStore + ?Sized>(
    store: &S,
    expected: &WatchTarget,
) -> Result<VerifyReport> {
    let present = store.collection_names().await?;
    let missing_collections = BOOTSTRAP_COLLECTIONS
        .iter()
        .filter(|name| !present.iter().any(|p| p == *name))
        .map(|name| (*name).to_owned())
        .collect();
    let stored = store.find_targets().await?;

    Ok(VerifyReport {
        missing_collections,
        stored,
        expected: expected.record(),
    })
}

/// Snapshot the bootstrap footprint for display.
pub async fn current_state<S: SetupStore + ?Sized>(store: &S) -> Result<StoreState> {
    let present = store.collection_names().await?;
    let collections = BOOTSTRAP_COLLECTIONS
        .iter()
        .filter(|name| present.iter().any(|p| p == *name))
        .map(|name| (*name).to_owned())
        .collect();
    let targets = store.find_targets().await?;

    Ok(StoreState {
        collections,
        targets,
    })
}

/// Drop the bootstrap collections. Destructive; confirmation is the
/// caller's job.
pub async fn reset<S: SetupStore + ?Sized>(store: &S) -> Result<Vec<String>> {
    let mut dropped = Vec::new();
    for name in BOOTSTRAP_COLLECTIONS {
        if store.drop_collection(name).await? {
            warn!("Dropped collection {}", name);
            dropped.push(name.to_owned());
        }
    }
    Ok(dropped)
}
