//! Per-entity version stamps guarding reconciliation and rollback.

use crate::board::domain::TaskId;
use std::collections::HashMap;

/// Monotonic stamp recorded when an entity changes locally or remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

/// Latest version per entity.
///
/// Stamps come from a single counter that survives [`VersionLedger::clear`],
/// so a stamp taken before a hydration can never match one taken after.
#[derive(Debug, Clone, Default)]
pub struct VersionLedger {
    counter: u64,
    latest: HashMap<TaskId, Version>,
}

impl VersionLedger {
    /// Records a change to `id` and returns its new version.
    pub fn stamp(&mut self, id: &TaskId) -> Version {
        self.counter += 1;
        let version = Version(self.counter);
        self.latest.insert(id.clone(), version);
        version
    }

    /// Returns the latest version of `id`.
    #[must_use]
    pub fn current(&self, id: &TaskId) -> Option<Version> {
        self.latest.get(id).copied()
    }

    /// Returns `true` when `version` is still the latest change to `id`.
    #[must_use]
    pub fn is_current(&self, id: &TaskId, version: Version) -> bool {
        self.current(id) == Some(version)
    }

    /// Moves the history of `from` to `to` and stamps the result.
    pub fn rename(&mut self, from: &TaskId, to: &TaskId) -> Version {
        self.latest.remove(from);
        self.stamp(to)
    }

    /// Drops the history of `id`.
    pub fn forget(&mut self, id: &TaskId) {
        self.latest.remove(id);
    }

    /// Drops every entity's history.
    pub fn clear(&mut self) {
        self.latest.clear();
    }
}
