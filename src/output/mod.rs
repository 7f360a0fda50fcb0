//! Renderers for the two artifacts
//!
//! - `content` - concatenated, fenced file contents for a whole subtree
//! - `tree` - ASCII tree of selected top-level entries
//! - `config` - output configuration types

mod config;
mod content;
mod tree;

pub use config::TreeConfig;
pub use content::{ContentRenderer, ContentSummary, write_block};
pub use tree::{
    BLANK, BRANCH, CONTINUATION, CORNER, Connector, LineKind, Segment, TreeLine, TreeRenderer,
    TreeSummary,
};
