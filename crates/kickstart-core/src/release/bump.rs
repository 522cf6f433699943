//! Version bump persisted to the descriptor

use crate::descriptor::{bump, DescriptorEditor, ReleaseKind};
use crate::error::Result;
use semver::Version;

/// Previous and new version after a bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpResult {
    pub previous: Version,
    pub version: Version,
}

/// Bump the descriptor version in place. No git, build or publish.
pub async fn bump_version(editor: &DescriptorEditor, kind: ReleaseKind) -> Result<BumpResult> {
    let mut descriptor = editor.load().await?;
    let previous = descriptor.version();
    let version = bump(&previous, kind)?;
    descriptor.set_version(&version);
    editor.save(&descriptor).await?;

    tracing::debug!(%previous, %version, %kind, "bumped version");
    Ok(BumpResult { previous, version })
}

/// Parse `kind` first so an invalid kind never reads or writes the descriptor.
pub async fn bump_version_str(editor: &DescriptorEditor, kind: &str) -> Result<BumpResult> {
    let kind: ReleaseKind = kind.parse()?;
    bump_version(editor, kind).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bump_writes_new_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"name": "demo", "version": "1.2.3"}"#).unwrap();

        let result = bump_version_str(&DescriptorEditor::new(&path), "minor")
            .await
            .unwrap();
        assert_eq!(result.previous, Version::new(1, 2, 3));
        assert_eq!(result.version, Version::new(1, 3, 0));
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("\"version\": \"1.3.0\""));
    }

    #[tokio::test]
    async fn test_invalid_kind_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        let original = r#"{"version":"1.2.3"}"#;
        std::fs::write(&path, original).unwrap();

        let err = bump_version_str(&DescriptorEditor::new(&path), "beta")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReleaseKind(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_missing_version_starts_from_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{}").unwrap();

        let result = bump_version_str(&DescriptorEditor::new(&path), "patch")
            .await
            .unwrap();
        assert_eq!(result.version, Version::new(0, 0, 1));
    }

    #[tokio::test]
    async fn test_overflowing_bump_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        let original = r#"{"version":"1.2.18446744073709551615"}"#;
        std::fs::write(&path, original).unwrap();

        let err = bump_version_str(&DescriptorEditor::new(&path), "patch")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::VersionOverflow { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
