//! Shared mutable board state behind the store's single write funnel.

use super::{index::ColumnIndex, versions::VersionLedger};
use crate::board::domain::BoardLayout;

/// Column Index plus the version ledger, always mutated together.
#[derive(Debug, Clone)]
pub struct BoardState {
    /// Ordered task sequences and placements.
    pub index: ColumnIndex,
    /// Latest version per entity.
    pub versions: VersionLedger,
}

impl BoardState {
    /// Creates an empty board for the layout.
    #[must_use]
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            index: ColumnIndex::new(layout),
            versions: VersionLedger::default(),
        }
    }

    /// Empties every column and forgets all versions.
    pub fn reset(&mut self) {
        self.index.clear();
        self.versions.clear();
    }
}
