//! Ordered, filtered directory traversal
//!
//! Everything `treedump` prints is derived from this module:
//!
//! - `read_children`: lists one directory, drops excluded entries and sorts
//!   the rest. Shared by the content dump and the tree view.
//! - `Walker`: lazy depth-first walk over a whole subtree built on
//!   `read_children`. Excluded directories are never listed.

mod config;
mod entry;
mod traversal;
mod walker;

pub use config::{SortOrder, WalkerConfig};
pub use entry::{EntryKind, FsEntry};
pub use traversal::read_children;
pub use walker::{Walk, Walker};
pub(crate) use walker::check_root;
