//! The bootstrap operations: everything the watcher needs in place before it
//! can start, expressed against the `SetupStore` trait so the flows run the
//! same over MongoDB and over the in-memory store the tests use.

pub mod ops;
pub mod report;
