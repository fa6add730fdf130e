//! Names of the database and collections the watcher reads from.

/// Default name of the watcher's MongoDB database.
pub const DEFAULT_DB_NAME: &str = "analog_db";

/// Names of the collections in the watcher's database.
pub mod collections {
    /// Holds the watch-target configuration document.
    pub const CONTRACTS: &str = "contracts";

    /// Sink the watcher writes observed events into. Created empty; this
    /// tool never writes to it.
    pub const EVENTS: &str = "events";
}

/// Collections the bootstrap owns, in creation order.
pub const BOOTSTRAP_COLLECTIONS: [&str; 2] = [collections::CONTRACTS, collections::EVENTS];
