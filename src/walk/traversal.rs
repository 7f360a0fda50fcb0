//! Directory listing shared by the walker and the tree renderer.

use std::fs;
use std::io;
use std::path::Path;

use crate::matcher::PathMatcher;

use super::config::SortOrder;
use super::entry::FsEntry;

/// Read, filter, and sort the immediate children of `dir`.
///
/// Excluded children are dropped here, before anyone can descend into them.
/// Items that vanish between listing and inspection are skipped.
pub fn read_children(dir: &Path, matcher: &PathMatcher, order: SortOrder) -> io::Result<Vec<FsEntry>> {
    log::trace!("listing {}", dir.display());

    let mut children = Vec::new();
    for item in fs::read_dir(dir)? {
        let Ok(item) = item else { continue };
        let path = item.path();
        if matcher.is_excluded(&path) {
            log::debug!("excluded {}", path.display());
            continue;
        }
        match FsEntry::from_dir_entry(&item) {
            Ok(entry) => children.push(entry),
            Err(e) => log::debug!("skipping {}: {}", path.display(), e),
        }
    }

    order.sort(&mut children);
    Ok(children)
}
