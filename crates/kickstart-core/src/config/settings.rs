//! Layered settings: built-in defaults, `kickstart.yaml`, then environment

use super::package_manager::PackageManager;
use crate::context::ProjectContext;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings file looked up in the project root
pub const SETTINGS_FILE: &str = "kickstart.yaml";

/// Environment variable overriding the package manager
pub const PACKAGE_MANAGER_ENV: &str = "KICKSTART_PACKAGE_MANAGER";

/// Environment variable overriding the tag prefix
pub const TAG_PREFIX_ENV: &str = "KICKSTART_TAG_PREFIX";

/// Contents of `kickstart.yaml`; every key optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub package_manager: Option<PackageManager>,
    #[serde(default)]
    pub tag_prefix: Option<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
    #[serde(default)]
    pub release_message: Option<String>,
    #[serde(default)]
    pub stash_message: Option<String>,
    #[serde(default)]
    pub build_script: Option<String>,
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub package_manager: PackageManager,
    /// Prefix for release tags (`v` gives `v1.2.3`)
    pub tag_prefix: String,
    /// Default message when committing a dirty tree before release
    pub commit_message: String,
    /// Release commit message; `{version}` is replaced
    pub release_message: String,
    pub stash_message: String,
    /// Descriptor script run before committing a release
    pub build_script: String,
    /// Source entry placeholder path
    pub entry: String,
    /// Compiled output directory
    pub out_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::Npm,
            tag_prefix: "v".to_string(),
            commit_message: "chore: pre-release changes".to_string(),
            release_message: "chore(release): {version}".to_string(),
            stash_message: "kickstart: pre-release stash".to_string(),
            build_script: "build".to_string(),
            entry: "src/index.ts".to_string(),
            out_dir: "dist".to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings for the project in `ctx`.
    pub fn load(ctx: &ProjectContext) -> Result<Self> {
        let path = ctx.path(SETTINGS_FILE);
        let file = if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|e| Error::Config {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            Self::parse_file(&content).map_err(|reason| Error::Config {
                path: path.clone(),
                reason,
            })?
        } else {
            SettingsFile::default()
        };

        let mut settings = Self::from_file(file, PackageManager::detect(ctx));

        if let Some(pm) = ctx.var(PACKAGE_MANAGER_ENV).filter(|v| !v.trim().is_empty()) {
            settings.package_manager = pm.parse()?;
        }
        if let Some(prefix) = ctx.var(TAG_PREFIX_ENV) {
            settings.tag_prefix = prefix.to_string();
        }

        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }

    fn parse_file(content: &str) -> std::result::Result<SettingsFile, String> {
        if content.trim().is_empty() {
            return Ok(SettingsFile::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply file values over defaults; a detected package manager sits
    /// between the two.
    pub fn from_file(file: SettingsFile, detected: Option<PackageManager>) -> Self {
        let defaults = Self::default();
        Self {
            package_manager: file
                .package_manager
                .or(detected)
                .unwrap_or(defaults.package_manager),
            tag_prefix: file.tag_prefix.unwrap_or(defaults.tag_prefix),
            commit_message: file.commit_message.unwrap_or(defaults.commit_message),
            release_message: file.release_message.unwrap_or(defaults.release_message),
            stash_message: file.stash_message.unwrap_or(defaults.stash_message),
            build_script: file.build_script.unwrap_or(defaults.build_script),
            entry: file.entry.unwrap_or(defaults.entry),
            out_dir: file.out_dir.unwrap_or(defaults.out_dir),
        }
    }

    pub fn tag_for(&self, version: &semver::Version) -> String {
        format!("{}{}", self.tag_prefix, version)
    }

    pub fn release_message_for(&self, version: &semver::Version) -> String {
        self.release_message
            .replace("{version}", &version.to_string())
    }
}
