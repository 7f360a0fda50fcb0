//! Configuration types for walkers

use std::cmp::Ordering;

use super::entry::FsEntry;

/// Sibling ordering applied before entries are yielded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Case-insensitive by name, ties broken by the raw name.
    #[default]
    Name,
    /// Directories first, then `Name` order within each group.
    DirsFirst,
}

impl SortOrder {
    pub fn compare(self, a: &FsEntry, b: &FsEntry) -> Ordering {
        let by_name = || {
            a.sort_key()
                .cmp(&b.sort_key())
                .then_with(|| a.name().cmp(b.name()))
        };
        match self {
            SortOrder::Name => by_name(),
            SortOrder::DirsFirst => (!a.is_dir()).cmp(&!b.is_dir()).then_with(by_name),
        }
    }

    pub fn sort(self, entries: &mut [FsEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

/// Configuration for walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    pub order: SortOrder,
    /// Deepest level to descend into; children of the root are level 1.
    pub max_depth: Option<usize>,
}

impl WalkerConfig {
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether entries at `depth` may be descended into.
    pub fn can_descend(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}
