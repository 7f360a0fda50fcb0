//! Tree view of selected top-level entries
//!
//! Lines are `<prefix><connector><name>`. Every sibling but the last gets the
//! branch connector and hands a continuation segment down to its children;
//! the last sibling gets the corner connector and hands down a blank segment,
//! so vertical guides only run past ancestors that still have siblings below.

use std::collections::HashSet;
use std::fmt;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::error::{Error, Result};
use crate::matcher::PathMatcher;
use crate::walk::{FsEntry, SortOrder, read_children};

use super::config::TreeConfig;

pub const BRANCH: &str = "├── ";
pub const CORNER: &str = "└── ";
pub const CONTINUATION: &str = "│   ";
pub const BLANK: &str = "    ";

const PERMISSION_DENIED: &str = "[permission denied]";

/// One ancestor's contribution to a line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The ancestor has siblings below it: keep the vertical guide.
    Continuation,
    Blank,
}

impl Segment {
    /// Segment handed down by an entry to its children.
    pub fn below(is_last: bool) -> Self {
        if is_last {
            Segment::Blank
        } else {
            Segment::Continuation
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Segment::Continuation => CONTINUATION,
            Segment::Blank => BLANK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    Branch,
    Corner,
}

impl Connector {
    pub fn for_position(is_last: bool) -> Self {
        if is_last {
            Connector::Corner
        } else {
            Connector::Branch
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Connector::Branch => BRANCH,
            Connector::Corner => CORNER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Directory,
    File,
    /// Stands in for the contents of a directory that could not be listed.
    Placeholder,
}

/// A single rendered line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub segments: Vec<Segment>,
    pub connector: Connector,
    pub label: String,
    pub kind: LineKind,
}

impl TreeLine {
    fn entry(segments: &[Segment], is_last: bool, entry: &FsEntry) -> Self {
        Self {
            segments: segments.to_vec(),
            connector: Connector::for_position(is_last),
            label: entry.name().to_string(),
            kind: if entry.is_dir() {
                LineKind::Directory
            } else {
                LineKind::File
            },
        }
    }

    fn permission_denied(segments: &[Segment]) -> Self {
        Self {
            segments: segments.to_vec(),
            connector: Connector::Corner,
            label: PERMISSION_DENIED.to_string(),
            kind: LineKind::Placeholder,
        }
    }

    pub fn prefix(&self) -> String {
        self.segments.iter().map(|s| s.glyph()).collect()
    }

    fn write<W: WriteColor + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}{}", self.prefix(), self.connector.glyph())?;
        match self.kind {
            LineKind::Directory => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                write!(out, "{}", self.label)?;
                out.reset()?;
            }
            LineKind::Placeholder => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                write!(out, "{}", self.label)?;
                out.reset()?;
            }
            LineKind::File => write!(out, "{}", self.label)?,
        }
        writeln!(out)
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix(), self.connector.glyph(), self.label)
    }
}

/// Totals for one tree render. `top_level == 0` means nothing was drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub top_level: usize,
    pub directories: usize,
    pub files: usize,
    pub denied: usize,
}

impl TreeSummary {
    pub fn is_empty(&self) -> bool {
        self.top_level == 0
    }

    fn count(&mut self, entry: &FsEntry) {
        if entry.is_dir() {
            self.directories += 1;
        } else {
            self.files += 1;
        }
    }
}

/// Draws named top-level entries of a base directory and everything below
/// them that the matcher lets through.
pub struct TreeRenderer<'a> {
    matcher: &'a PathMatcher,
    config: TreeConfig,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(matcher: &'a PathMatcher, config: TreeConfig) -> Self {
        Self { matcher, config }
    }

    /// Resolve `names` against `base`, dropping names that do not exist or
    /// are excluded, and order the rest directories first.
    pub fn select<S: AsRef<str>>(&self, base: &Path, names: &[S]) -> Result<Vec<FsEntry>> {
        crate::walk::check_root(base)?;

        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                continue;
            }
            let path = base.join(name);
            if !path.exists() {
                log::debug!("{} does not exist, skipped", path.display());
                continue;
            }
            if self.matcher.is_excluded(&path) {
                log::debug!("excluded {}", path.display());
                continue;
            }
            match FsEntry::from_path(&path, name) {
                Ok(entry) => selected.push(entry),
                Err(e) => log::debug!("skipping {}: {}", path.display(), e),
            }
        }

        SortOrder::DirsFirst.sort(&mut selected);
        Ok(selected)
    }

    /// Render the selected entries of `base` to `out`.
    pub fn render<S, W>(&self, base: &Path, names: &[S], out: &mut W) -> Result<TreeSummary>
    where
        S: AsRef<str>,
        W: WriteColor + ?Sized,
    {
        let selected = self.select(base, names)?;
        let mut summary = TreeSummary {
            top_level: selected.len(),
            ..Default::default()
        };

        let mut segments = Vec::new();
        self.render_level(&selected, &mut segments, 1, out, &mut summary)?;
        Ok(summary)
    }

    /// Render one list of siblings at `depth`, recursing into directories.
    fn render_level<W: WriteColor + ?Sized>(
        &self,
        entries: &[FsEntry],
        segments: &mut Vec<Segment>,
        depth: usize,
        out: &mut W,
        summary: &mut TreeSummary,
    ) -> Result<()> {
        let total = entries.len();
        for (i, entry) in entries.iter().enumerate() {
            let is_last = i + 1 == total;
            TreeLine::entry(segments, is_last, entry)
                .write(out)
                .map_err(Error::Write)?;
            summary.count(entry);

            if !entry.is_descendable() || !self.config.can_descend(depth) {
                continue;
            }

            segments.push(Segment::below(is_last));
            let result = self.render_children(entry, segments, depth + 1, out, summary);
            segments.pop();
            result?;
        }
        Ok(())
    }

    fn render_children<W: WriteColor + ?Sized>(
        &self,
        dir: &FsEntry,
        segments: &mut Vec<Segment>,
        depth: usize,
        out: &mut W,
        summary: &mut TreeSummary,
    ) -> Result<()> {
        let children = match read_children(dir.path(), self.matcher, SortOrder::DirsFirst) {
            Ok(children) => children,
            Err(source) if source.kind() == ErrorKind::PermissionDenied => {
                log::debug!("cannot list {}: {}", dir.path().display(), source);
                summary.denied += 1;
                return TreeLine::permission_denied(segments)
                    .write(out)
                    .map_err(Error::Write);
            }
            Err(source) => {
                return Err(Error::ReadDir {
                    path: dir.path().to_path_buf(),
                    source,
                });
            }
        };
        self.render_level(&children, segments, depth, out, summary)
    }
}
