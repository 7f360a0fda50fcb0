//! Exclusion rules for walking and tree rendering
//!
//! Two policies share one matcher:
//!
//! - `AncestorPath` excludes a path and everything beneath it. Paths are
//!   compared component by component, so `foo/bar` never matches `foo/barbaz`.
//! - `NameGlob` excludes any entry whose final segment matches a shell glob,
//!   at every depth.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;

use crate::error::{Error, Result};

/// A single exclusion predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    AncestorPath(PathBuf),
    NameGlob(Pattern),
}

impl ExclusionRule {
    /// Rule excluding `path` and its whole subtree.
    pub fn ancestor(path: impl AsRef<Path>) -> Self {
        ExclusionRule::AncestorPath(normalize(path.as_ref()))
    }

    /// Rule excluding every entry whose name matches `pattern`.
    pub fn glob(pattern: &str) -> Result<Self> {
        Pattern::new(pattern)
            .map(ExclusionRule::NameGlob)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            ExclusionRule::AncestorPath(rule) => normalize(path).starts_with(rule),
            ExclusionRule::NameGlob(pattern) => path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy())),
        }
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionRule::AncestorPath(path) => write!(f, "{}", to_slash(path)),
            ExclusionRule::NameGlob(pattern) => write!(f, "{}", pattern.as_str()),
        }
    }
}

/// Ordered set of exclusion rules. An entry is excluded if any rule matches.
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    rules: Vec<ExclusionRule>,
}

impl PathMatcher {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// Build a matcher from ancestor paths and name globs in one go.
    pub fn from_parts<P, S>(paths: P, globs: S) -> Result<Self>
    where
        P: IntoIterator,
        P::Item: AsRef<Path>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut rules: Vec<ExclusionRule> = paths.into_iter().map(ExclusionRule::ancestor).collect();
        for pattern in globs {
            rules.push(ExclusionRule::glob(pattern.as_ref())?);
        }
        Ok(Self::new(rules))
    }

    pub fn with_rule(mut self, rule: ExclusionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        is_excluded(path, &self.rules)
    }
}

/// True when any rule in `rules` matches `path`.
pub fn is_excluded(path: &Path, rules: &[ExclusionRule]) -> bool {
    rules.iter().any(|rule| rule.matches(path))
}

/// Lexically normalize a path: drop `.` components. `..` is kept as is.
pub fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Render a path with `/` separators regardless of host conventions.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::RootDir => {
                out.push('/');
                continue;
            }
            Component::Prefix(prefix) => {
                out.push_str(&prefix.as_os_str().to_string_lossy());
                continue;
            }
            Component::ParentDir | Component::Normal(_) => {}
        }
        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    if out.is_empty() { ".".to_string() } else { out }
}
