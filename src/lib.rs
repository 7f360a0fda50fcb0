//! treedump - dump a source tree as fenced text blocks or draw it as a tree

pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod output;
pub mod profile;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use diagnostics::{ConsoleDiagnostics, Diagnostic, Diagnostics, NullDiagnostics, Severity};
pub use error::{Error, Result};
pub use matcher::{ExclusionRule, PathMatcher};
pub use output::{ContentRenderer, ContentSummary, TreeConfig, TreeRenderer, TreeSummary};
pub use profile::{DEFAULT_TREE_IGNORES, DumpProfile, Profile, TreeProfile};
pub use walk::{EntryKind, FsEntry, SortOrder, Walker, WalkerConfig};
