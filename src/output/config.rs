//! Output configuration types

/// Configuration for the tree view.
#[derive(Debug, Clone, Default)]
pub struct TreeConfig {
    /// Deepest level to draw; top-level entries are level 1.
    pub max_depth: Option<usize>,
}

impl TreeConfig {
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a directory drawn at `depth` may be expanded.
    pub fn can_descend(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}
