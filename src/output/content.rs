//! Content dump: every file under a root as a labelled, fenced block
//!
//! A block is the label line, an opening fence line, the file text, a
//! newline, a closing fence line and one blank line. The label is the file's
//! path relative to the walk root, always with `/` separators.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Error, Result};
use crate::matcher::to_slash;
use crate::walk::{FsEntry, Walker};

const FENCE: &str = "```";

/// Totals for one content dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSummary {
    pub blocks: usize,
    pub failures: usize,
    pub bytes: usize,
}

/// Writes content blocks to a single destination.
///
/// Per-file failures go to the diagnostics sink and never stop the render.
/// Only failures writing the destination are returned as errors.
pub struct ContentRenderer<W: Write> {
    out: W,
    label_root: bool,
    emitted: HashSet<String>,
    summary: ContentSummary,
}

impl<W: Write> ContentRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label_root: false,
            emitted: HashSet::new(),
            summary: ContentSummary::default(),
        }
    }

    /// Prefix labels with the walk root as spelled (`daemon/cpp/main.cpp`
    /// instead of `cpp/main.cpp`).
    pub fn with_label_root(mut self, label_root: bool) -> Self {
        self.label_root = label_root;
        self
    }

    pub fn summary(&self) -> ContentSummary {
        self.summary
    }

    /// Walk `walker`'s root and render every file it yields.
    pub fn render_walker<D: Diagnostics>(&mut self, walker: &Walker, diagnostics: &mut D) -> Result<()> {
        self.walk_into(walker, self.label_root, diagnostics)
    }

    /// Like `render_walker`, but labels always carry the root as spelled so
    /// blocks from several roots stay apart in one artifact.
    pub fn render_extra_walker<D: Diagnostics>(&mut self, walker: &Walker, diagnostics: &mut D) -> Result<()> {
        self.walk_into(walker, true, diagnostics)
    }

    fn walk_into<D: Diagnostics>(&mut self, walker: &Walker, prefix_root: bool, diagnostics: &mut D) -> Result<()> {
        let walk = walker.walk()?;
        diagnostics.report(Diagnostic::Scanning {
            root: walker.root().to_path_buf(),
            rules: walker.matcher().rules().iter().map(ToString::to_string).collect(),
        });
        self.render_labelled(walker.root(), walk, prefix_root, diagnostics)
    }

    /// Render a sequence of walk results rooted at `root`, in order.
    ///
    /// Directories and special files produce no block. `Err` items (listing
    /// failures below the root) are reported and skipped.
    pub fn render_entries<I, D>(&mut self, root: &Path, entries: I, diagnostics: &mut D) -> Result<()>
    where
        I: IntoIterator<Item = Result<FsEntry>>,
        D: Diagnostics,
    {
        self.render_labelled(root, entries, self.label_root, diagnostics)
    }

    fn render_labelled<I, D>(&mut self, root: &Path, entries: I, prefix_root: bool, diagnostics: &mut D) -> Result<()>
    where
        I: IntoIterator<Item = Result<FsEntry>>,
        D: Diagnostics,
    {
        for item in entries {
            let entry = match item {
                Ok(entry) => entry,
                Err(error) => {
                    self.summary.failures += 1;
                    diagnostics.report(Diagnostic::DirectoryFailed { error });
                    continue;
                }
            };
            if !entry.is_file() {
                continue;
            }
            let label = label_for(root, entry.path(), prefix_root);
            self.render_file(entry.path(), &label, diagnostics)?;
        }
        Ok(())
    }

    /// Render one file under `label`. Returns whether a block was written.
    pub fn render_file<D: Diagnostics>(
        &mut self,
        path: &Path,
        label: &str,
        diagnostics: &mut D,
    ) -> Result<bool> {
        if self.emitted.contains(label) {
            diagnostics.report(Diagnostic::Duplicate {
                label: label.to_string(),
            });
            return Ok(false);
        }

        let text = match read_text(path) {
            Ok(text) => text,
            Err(error) => {
                self.summary.failures += 1;
                diagnostics.report(Diagnostic::FileFailed {
                    path: path.to_path_buf(),
                    error,
                });
                return Ok(false);
            }
        };

        write_block(&mut self.out, label, &text).map_err(Error::Write)?;
        self.emitted.insert(label.to_string());
        self.summary.blocks += 1;
        self.summary.bytes += text.len();
        diagnostics.report(Diagnostic::Processed {
            path: path.to_path_buf(),
        });
        Ok(true)
    }

    /// Flush the destination and return the totals.
    pub fn finish(mut self) -> Result<ContentSummary> {
        self.out.flush().map_err(Error::Write)?;
        Ok(self.summary)
    }

}

/// `path` relative to `root`, optionally prefixed with `root` as spelled.
fn label_for(root: &Path, path: &Path, prefix_root: bool) -> String {
    let relative = to_slash(path.strip_prefix(root).unwrap_or(path));
    if !prefix_root {
        return relative;
    }
    match to_slash(root).as_str() {
        "." => relative,
        root if root.ends_with('/') => format!("{}{}", root, relative),
        root => format!("{}/{}", root, relative),
    }
}

/// Read a whole file as UTF-8. The file is closed before this returns.
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| Error::NotUtf8 {
        path: path.to_path_buf(),
        source,
    })
}

/// Write one `label`, fence, text, fence, blank line block.
pub fn write_block<W: Write + ?Sized>(out: &mut W, label: &str, text: &str) -> io::Result<()> {
    writeln!(out, "{}", label)?;
    writeln!(out, "{}", FENCE)?;
    out.write_all(text.as_bytes())?;
    write!(out, "\n{}\n\n", FENCE)
}
