//! JSON profiles holding the lists each command works from
//!
//! A profile replaces hard-coded script constants: which root to dump, what
//! to leave out, which top-level entries the tree shows. Every field is
//! optional; command-line values extend lists and override scalars.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Names left out of the tree view unless defaults are disabled.
pub const DEFAULT_TREE_IGNORES: &[&str] = &[
    "build",
    ".git",
    ".gradle",
    ".idea",
    "__pycache__",
    ".DS_Store",
    "*.iml",
    "local.properties",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub dump: DumpProfile,
    pub tree: TreeProfile,
}

/// Settings for the content dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DumpProfile {
    pub root: Option<PathBuf>,
    /// Individual files written before the walk, in order.
    pub files: Vec<PathBuf>,
    /// Further roots walked after `root`; their labels carry the root.
    pub dirs: Vec<PathBuf>,
    /// Paths excluded with their whole subtree.
    pub exclude: Vec<PathBuf>,
    /// Name globs excluded at every depth.
    pub ignore: Vec<String>,
    pub output: Option<PathBuf>,
    pub label_root: bool,
}

/// Settings for the tree view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeProfile {
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub ignore: Vec<String>,
    pub exclude: Vec<PathBuf>,
    pub default_ignores: bool,
    pub max_depth: Option<usize>,
}

impl Default for TreeProfile {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            files: Vec::new(),
            ignore: Vec::new(),
            exclude: Vec::new(),
            default_ignores: true,
            max_depth: None,
        }
    }
}

impl TreeProfile {
    /// Top-level names: directories, then files.
    pub fn names(&self) -> Vec<String> {
        self.directories
            .iter()
            .chain(&self.files)
            .cloned()
            .collect()
    }

    /// Ignore globs including the defaults when enabled.
    pub fn effective_ignores(&self) -> Vec<String> {
        let defaults = DEFAULT_TREE_IGNORES
            .iter()
            .filter(|_| self.default_ignores)
            .map(|s| s.to_string());
        defaults.chain(self.ignore.iter().cloned()).collect()
    }
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    fn parse(text: &str) -> Result<Profile> {
        Profile::parse(Path::new("profile.json"), text)
    }

    #[test]
    fn test_empty_profile_uses_defaults() {
        let profile = parse("{}").unwrap();
        assert_eq!(profile, Profile::default());
        assert!(profile.tree.default_ignores);
        assert_eq!(profile.tree.effective_ignores().len(), DEFAULT_TREE_IGNORES.len());
    }

    #[test]
    fn test_full_profile() {
        let profile = parse(
            r#"{
                "dump": {
                    "root": "daemon",
                    "exclude": ["daemon/third_party"],
                    "dirs": ["app/src/main/java", "app/src/main/kotlin"],
                    "output": "daemon_context.txt",
                    "label_root": true
                },
                "tree": {
                    "directories": ["app", "daemon"],
                    "files": ["build.gradle.kts"],
                    "ignore": ["*.log"],
                    "default_ignores": false
                }
            }"#,
        )
        .unwrap();

        assert_eq!(profile.dump.root, Some(PathBuf::from("daemon")));
        assert_eq!(profile.dump.exclude, [PathBuf::from("daemon/third_party")]);
        assert!(profile.dump.label_root);
        assert_eq!(
            profile.dump.dirs,
            [PathBuf::from("app/src/main/java"), PathBuf::from("app/src/main/kotlin")]
        );
        assert_eq!(profile.tree.names(), ["app", "daemon", "build.gradle.kts"]);
        assert_eq!(profile.tree.effective_ignores(), ["*.log"]);
    }

    #[test]
    fn test_defaults_come_before_extra_ignores() {
        let profile = parse(r#"{"tree": {"ignore": ["target"]}}"#).unwrap();
        let ignores = profile.tree.effective_ignores();
        assert_eq!(ignores.first().map(String::as_str), Some("build"));
        assert_eq!(ignores.last().map(String::as_str), Some("target"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = parse(r#"{"dump": {"roots": ["a"]}}"#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("profile.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TestDir::new();
        let err = Profile::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TestDir::new();
        let path = dir.add_file("p.json", r#"{"tree": {"max_depth": 3}}"#);
        let profile = Profile::load(&path).unwrap();
        assert_eq!(profile.tree.max_depth, Some(3));
    }
}
