//! Point-in-time member snapshots

mod store;

pub use store::{FileSnapshotStore, SnapshotStore};

#[cfg(test)]
pub use store::mock;
