//! Progress and failure reporting kept apart from the rendered artifact
//!
//! Renderers report through a `Diagnostics` sink instead of printing. Callers
//! pick the sink: `NullDiagnostics` drops everything, `Vec<Diagnostic>`
//! collects for inspection, `ConsoleDiagnostics` prints colored lines to
//! stderr.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::Error;
use crate::output::{ContentSummary, TreeSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug)]
pub enum Diagnostic {
    /// A walk over `root` is starting with the listed exclusion rules.
    Scanning { root: PathBuf, rules: Vec<String> },
    /// A block was written for `path`.
    Processed { path: PathBuf },
    /// `path` could not be read or decoded; no block was written.
    FileFailed { path: PathBuf, error: Error },
    /// An explicitly requested file does not exist or is not a file.
    MissingFile { path: PathBuf },
    /// An extra dump root does not exist or is not a directory.
    MissingDirectory { path: PathBuf },
    /// A directory below the root could not be listed.
    DirectoryFailed { error: Error },
    /// A block with this label was already written.
    Duplicate { label: String },
    /// No top-level entry survived filtering.
    NothingToShow,
    /// The content dump is complete.
    Wrote { destination: String, summary: ContentSummary },
    /// The tree view is complete.
    TreeDone { summary: TreeSummary },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::FileFailed { .. } | Diagnostic::DirectoryFailed { .. } => Severity::Error,
            Diagnostic::MissingFile { .. }
            | Diagnostic::MissingDirectory { .. }
            | Diagnostic::Duplicate { .. }
            | Diagnostic::NothingToShow => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Scanning { root, rules } if rules.is_empty() => {
                write!(f, "scanning '{}'", root.display())
            }
            Diagnostic::Scanning { root, rules } => {
                write!(f, "scanning '{}' (excluding {})", root.display(), rules.join(", "))
            }
            Diagnostic::Processed { path } => write!(f, "processed {}", path.display()),
            Diagnostic::FileFailed { error, .. } => write!(f, "skipped: {}", error),
            Diagnostic::MissingFile { path } => {
                write!(f, "'{}' not found, skipped", path.display())
            }
            Diagnostic::MissingDirectory { path } => {
                write!(f, "directory '{}' not found, skipped", path.display())
            }
            Diagnostic::DirectoryFailed { error } => write!(f, "skipped: {}", error),
            Diagnostic::Duplicate { label } => write!(f, "'{}' already written, skipped", label),
            Diagnostic::NothingToShow => write!(f, "no matching files or directories found"),
            Diagnostic::Wrote {
                destination,
                summary,
            } => write!(
                f,
                "wrote {} files ({} bytes) to {}, {} failed",
                summary.blocks, summary.bytes, destination, summary.failures
            ),
            Diagnostic::TreeDone { summary } => {
                write!(f, "{} directories, {} files", summary.directories, summary.files)?;
                if summary.denied > 0 {
                    write!(f, ", {} unreadable", summary.denied)?;
                }
                Ok(())
            }
        }
    }
}

/// Receiver for diagnostics produced while rendering.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl Diagnostics for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Prints diagnostics to stderr, one `treedump: ...` line each.
///
/// Every diagnostic is also logged at debug level, so `-vv` runs interleave
/// them with the walk's own log lines.
pub struct ConsoleDiagnostics {
    stderr: StandardStream,
    quiet: bool,
}

impl ConsoleDiagnostics {
    pub fn new(use_color: bool, quiet: bool) -> Self {
        // The caller has already weighed --color against the environment.
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            stderr: StandardStream::stderr(choice),
            quiet,
        }
    }

    fn write(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let severity = diagnostic.severity();
        write!(self.stderr, "treedump: ")?;
        match severity {
            Severity::Error => {
                self.stderr
                    .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(self.stderr, "error: ")?;
                self.stderr.reset()?;
            }
            Severity::Warning => {
                self.stderr
                    .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
                write!(self.stderr, "warning: ")?;
                self.stderr.reset()?;
            }
            Severity::Info => {}
        }
        writeln!(self.stderr, "{}", diagnostic)
    }
}

impl Diagnostics for ConsoleDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::debug!("{:?}: {}", diagnostic.severity(), diagnostic);
        if self.quiet && diagnostic.severity() == Severity::Info {
            return;
        }
        // Nowhere left to report a failing stderr.
        let _ = self.write(&diagnostic);
    }
}
