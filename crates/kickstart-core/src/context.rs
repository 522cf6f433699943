//! Explicit project context passed to every component

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Root directory and environment that a run operates on.
///
/// Components never consult the process working directory or environment
/// directly; they resolve paths against `root` and hand `env` to child
/// processes. Tests build a context over a temporary directory.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
    env: BTreeMap<String, String>,
}

impl ProjectContext {
    /// Context over `root` with no extra environment.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            env: BTreeMap::new(),
        }
    }

    /// Context over `root`, capturing the current process environment.
    pub fn from_process(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            env: std::env::vars().collect(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a project-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.path("package.json")
    }
}
