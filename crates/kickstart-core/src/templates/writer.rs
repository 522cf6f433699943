//! Writing scaffold files without clobbering existing ones

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What happened to a scaffold file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    /// File existed and was left alone
    Skipped,
    /// File existed and was replaced because overwrite was requested
    Overwritten,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Skipped => "exists, skipped",
            WriteOutcome::Overwritten => "overwritten",
        };
        f.write_str(label)
    }
}

/// Writes files under a project root
#[derive(Debug, Clone)]
pub struct ScaffoldWriter {
    root: PathBuf,
}

impl ScaffoldWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `content` to `relative` unless it exists and `overwrite` is false.
    ///
    /// An existing file is a normal `Skipped` outcome, not an error. Parent
    /// directories are created as needed.
    pub async fn write(
        &self,
        relative: impl AsRef<Path>,
        content: &str,
        overwrite: bool,
    ) -> Result<WriteOutcome> {
        let target = self.root.join(relative.as_ref());
        let existed = fs::try_exists(&target)
            .await
            .map_err(|source| write_error(&target, source))?;

        if existed && !overwrite {
            tracing::debug!(path = %target.display(), "scaffold file exists, skipping");
            return Ok(WriteOutcome::Skipped);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| write_error(parent, source))?;
        }

        fs::write(&target, content)
            .await
            .map_err(|source| write_error(&target, source))?;

        let outcome = if existed {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        };
        tracing::debug!(path = %target.display(), %outcome, "scaffold file written");
        Ok(outcome)
    }
}

fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let writer = ScaffoldWriter::new(dir.path());

        let outcome = writer.write("src/utils/index.ts", "export {};\n", false).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Created);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("src/utils/index.ts")).unwrap(),
            "export {};\n"
        );
    }

    #[tokio::test]
    async fn test_never_overwrites_without_flag() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "sentinel").unwrap();
        let writer = ScaffoldWriter::new(dir.path());

        let outcome = writer.write("README.md", "new", false).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(std::fs::read_to_string(dir.path().join("README.md")).unwrap(), "sentinel");
    }

    #[tokio::test]
    async fn test_always_overwrites_with_flag() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "sentinel").unwrap();
        let writer = ScaffoldWriter::new(dir.path());

        let outcome = writer.write("README.md", "new", true).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Overwritten);
        assert_eq!(std::fs::read_to_string(dir.path().join("README.md")).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_overwrite_on_missing_file_creates() {
        let dir = TempDir::new().unwrap();
        let writer = ScaffoldWriter::new(dir.path());
        let outcome = writer.write(".gitignore", "dist/\n", true).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Created);
    }

    #[tokio::test]
    async fn test_parent_is_a_file_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("src"), "not a dir").unwrap();
        let writer = ScaffoldWriter::new(dir.path());

        let err = writer.write("src/index.ts", "", false).await.unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
