//! Walker - lazy depth-first traversal of a directory subtree

use std::path::{Path, PathBuf};
use std::vec;

use crate::error::{Error, Result};
use crate::matcher::PathMatcher;

use super::config::WalkerConfig;
use super::entry::FsEntry;
use super::traversal::read_children;

/// Walks one root with one matcher. `walk()` may be called repeatedly; each
/// call starts over from the root.
pub struct Walker<'a> {
    root: PathBuf,
    matcher: &'a PathMatcher,
    config: WalkerConfig,
}

impl<'a> Walker<'a> {
    pub fn new(root: impl Into<PathBuf>, matcher: &'a PathMatcher, config: WalkerConfig) -> Self {
        Self {
            root: root.into(),
            matcher,
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &'a PathMatcher {
        self.matcher
    }

    /// Check that the root is a readable directory and start walking it.
    pub fn walk(&self) -> Result<Walk<'a>> {
        check_root(&self.root)?;
        let children = read_children(&self.root, self.matcher, self.config.order).map_err(|source| {
            Error::ReadDir {
                path: self.root.clone(),
                source,
            }
        })?;
        Ok(Walk {
            matcher: self.matcher,
            config: self.config.clone(),
            stack: vec![children.into_iter()],
            pending: None,
        })
    }
}

/// Fail with `MissingRoot` or `NotADirectory` unless `root` is a directory.
pub(crate) fn check_root(root: &Path) -> Result<()> {
    match root.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(_) => Err(Error::MissingRoot {
            path: root.to_path_buf(),
        }),
    }
}

/// Iterator over the entries below a root in depth-first pre-order.
///
/// A directory that cannot be listed is yielded, followed by one
/// `Err(Error::ReadDir)`; the walk then carries on with its siblings.
pub struct Walk<'a> {
    matcher: &'a PathMatcher,
    config: WalkerConfig,
    stack: Vec<vec::IntoIter<FsEntry>>,
    pending: Option<Error>,
}

impl Walk<'_> {
    /// Depth of the entries currently being yielded (root children are 1).
    fn depth(&self) -> usize {
        self.stack.len()
    }

    fn descend(&mut self, dir: &FsEntry) {
        match read_children(dir.path(), self.matcher, self.config.order) {
            Ok(children) => self.stack.push(children.into_iter()),
            Err(source) => {
                self.pending = Some(Error::ReadDir {
                    path: dir.path().to_path_buf(),
                    source,
                })
            }
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<FsEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(entry) => {
                    if entry.is_descendable() && self.config.can_descend(self.depth()) {
                        self.descend(&entry);
                    }
                    return Some(Ok(entry));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
