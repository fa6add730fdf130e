use common::target::TargetRecord;
use serde::Serialize;

/// What one `init` run changed.
#[derive(Debug, Clone, Serialize)]
pub struct InitOutcome {
    /// Collections created by this run; ones that already existed are left
    /// alone and not listed.
    pub created: Vec<String>,
    /// Whether this run inserted the watch-target document.
    pub seeded: bool,
}

impl InitOutcome {
    /// True when the run found everything already in place.
    pub fn already_provisioned(&self) -> bool {
        self.created.is_empty() && !self.seeded
    }
}

/// Result of checking the provisioned-store property: both bootstrap
/// collections exist, and exactly one stored record equals the expected
/// watch target.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub missing_collections: Vec<String>,
    pub stored: Vec<TargetRecord>,
    pub expected: TargetRecord,
}

impl VerifyReport {
    pub fn satisfied(&self) -> bool {
        self.missing_collections.is_empty()
            && self.stored.len() == 1
            && self.stored[0] == self.expected
    }
}

/// Read-only snapshot of the bootstrap footprint.
#[derive(Debug, Clone, Serialize)]
pub struct StoreState {
    /// Bootstrap collections currently present, in bootstrap order.
    pub collections: Vec<String>,
    pub targets: Vec<TargetRecord>,
}
