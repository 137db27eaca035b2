// Snapshot of the cache contents.
// The unit that gets persisted after every mutation and loaded on startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::github::{Branch, Repository};

/// Full contents of both cache maps.
///
/// Serialized as `{ "users": {...}, "repositories": {...} }`. `BTreeMap` keeps the
/// file ordering stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Username -> repositories, in API response order.
    #[serde(default)]
    pub users: BTreeMap<String, Vec<Repository>>,
    /// `"<username>/<repository>"` -> branches, in API response order.
    #[serde(default)]
    pub repositories: BTreeMap<String, Vec<Branch>>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.repositories.is_empty()
    }
}

/// Composite key for the branch map.
pub fn repo_key(username: &str, repository: &str) -> String {
    format!("{}/{}", username, repository)
}
