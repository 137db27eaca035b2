// Cache module for the persisted GitHub data.
// Snapshot layout, storage backends, and on-disk locations.

pub mod paths;
pub mod persistence;
pub mod snapshot;

pub use persistence::{FileSnapshotStore, MemorySnapshotStore, NoopSnapshotStore, SnapshotStore};
pub use snapshot::{Snapshot, repo_key};
