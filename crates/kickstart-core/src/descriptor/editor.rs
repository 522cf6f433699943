//! Load, mutate and save `package.json`

use super::document::Descriptor;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads and writes a single descriptor file
#[derive(Debug, Clone)]
pub struct DescriptorEditor {
    path: PathBuf,
}

impl DescriptorEditor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub async fn load(&self) -> Result<Descriptor> {
        let text = self.read_text().await?;
        Descriptor::parse(&text).map_err(|reason| Error::DescriptorRead {
            path: self.path.clone(),
            reason,
        })
    }

    pub async fn save(&self, descriptor: &Descriptor) -> Result<()> {
        fs::write(&self.path, descriptor.to_json_string())
            .await
            .map_err(|source| Error::DescriptorWrite {
                path: self.path.clone(),
                source,
            })
    }

    /// Load, apply `mutate`, and save.
    ///
    /// Mutators must be idempotent. The file is left untouched, formatting
    /// included, when the mutated document equals the one loaded. Returns
    /// whether it changed.
    pub async fn edit<F>(&self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut Descriptor),
    {
        let original = self.load().await?;
        let mut descriptor = original.clone();

        mutate(&mut descriptor);

        if descriptor == original {
            tracing::debug!(path = %self.path.display(), "descriptor unchanged");
            return Ok(false);
        }
        self.save(&descriptor).await?;
        tracing::debug!(path = %self.path.display(), "descriptor updated");
        Ok(true)
    }

    async fn read_text(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::DescriptorRead {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    fn editor_with(content: &str) -> (TempDir, DescriptorEditor) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, content).unwrap();
        (dir, DescriptorEditor::new(path))
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let editor = DescriptorEditor::new(dir.path().join("package.json"));
        let err = editor.load().await.unwrap_err();
        assert!(matches!(err, Error::DescriptorRead { .. }));
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let (_dir, editor) = editor_with("{ nope");
        let err = editor.load().await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn test_edit_preserves_untouched_fields() {
        let (_dir, editor) = editor_with(
            r#"{"name":"demo","version":"1.4.2","custom":{"keep":[1,2,3]},"private":true}"#,
        );

        let changed = editor
            .edit(|d| d.set_version(&Version::new(1, 5, 0)))
            .await
            .unwrap();
        assert!(changed);

        let written = std::fs::read_to_string(editor.path()).unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"demo\",\n  \"version\": \"1.5.0\",\n  \"custom\": {\n    \"keep\": [\n      1,\n      2,\n      3\n    ]\n  },\n  \"private\": true\n}\n"
        );
    }

    #[tokio::test]
    async fn test_edit_noop_does_not_rewrite() {
        let (_dir, editor) = editor_with("{\n  \"name\": \"demo\"\n}\n");
        let changed = editor.edit(|d| {
            d.ensure_field("name", "other");
        })
        .await
        .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn test_edit_noop_keeps_foreign_formatting() {
        let text = "{\n    \"name\": \"demo\",\n    \"type\": \"module\",\n    \"main\": \"dist/index.js\"\n}";
        let (_dir, editor) = editor_with(text);

        let changed = editor
            .edit(|d| {
                d.ensure_field("type", "module");
                d.ensure_field("main", "dist/index.js");
            })
            .await
            .unwrap();

        assert!(!changed);
        assert_eq!(std::fs::read_to_string(editor.path()).unwrap(), text);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let editor = DescriptorEditor::new(dir.path().join("missing").join("package.json"));
        let descriptor = Descriptor::parse("{}").unwrap();
        let err = editor.save(&descriptor).await.unwrap_err();
        assert!(matches!(err, Error::DescriptorWrite { .. }));
    }
}
