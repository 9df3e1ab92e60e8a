pub mod models;
mod snapshot;

#[cfg(test)]
pub mod fixtures;

pub use models::*;
pub use snapshot::{Snapshot, SnapshotSource};
