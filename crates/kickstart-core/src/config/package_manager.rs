//! Package manager selection and command shapes

use crate::context::ProjectContext;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Supported package managers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lockfiles in order of preference when detecting
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "Yarn",
            PackageManager::Bun => "Bun",
        }
    }

    pub(crate) fn install_hint(&self) -> &'static str {
        match self {
            PackageManager::Npm => "ships with Node.js, https://nodejs.org",
            PackageManager::Pnpm => "install from https://pnpm.io",
            PackageManager::Yarn => "install from https://yarnpkg.com",
            PackageManager::Bun => "install from https://bun.sh",
        }
    }

    /// Arguments for creating a descriptor, `-y` to accept every default
    pub fn init_args(&self, accept_defaults: bool) -> Vec<&'static str> {
        let mut args = vec!["init"];
        if accept_defaults && !matches!(self, PackageManager::Pnpm) {
            args.push("-y");
        }
        args
    }

    /// Arguments for adding development dependencies
    pub fn add_dev_args<'a>(&self, packages: &[&'a str]) -> Vec<&'a str> {
        let mut args: Vec<&'a str> = match self {
            PackageManager::Npm => vec!["install", "--save-dev"],
            PackageManager::Pnpm | PackageManager::Yarn => vec!["add", "-D"],
            PackageManager::Bun => vec!["add", "-d"],
        };
        args.extend_from_slice(packages);
        args
    }

    pub fn run_script_args<'a>(&self, script: &'a str) -> Vec<&'a str> {
        vec!["run", script]
    }

    /// Shell form of running a script, used inside descriptor scripts
    pub fn run_script_command(&self, script: &str) -> String {
        format!("{} run {}", self.program(), script)
    }

    pub fn publish_args(&self) -> Vec<&'static str> {
        vec!["publish"]
    }

    /// Detect from lockfiles in the project root.
    pub fn detect(ctx: &ProjectContext) -> Option<PackageManager> {
        LOCKFILES.iter().find_map(|(file, pm)| {
            let path: PathBuf = ctx.path(file);
            path.is_file().then_some(*pm)
        })
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            other => Err(Error::Config {
                path: PathBuf::from("KICKSTART_PACKAGE_MANAGER"),
                reason: format!("unknown package manager '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_from_lockfile() {
        let dir = TempDir::new().unwrap();
        let ctx = ProjectContext::new(dir.path());
        assert_eq!(PackageManager::detect(&ctx), None);

        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(PackageManager::detect(&ctx), Some(PackageManager::Yarn));

        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(&ctx), Some(PackageManager::Pnpm));
    }

    #[test]
    fn test_add_dev_args() {
        assert_eq!(
            PackageManager::Npm.add_dev_args(&["typescript"]),
            vec!["install", "--save-dev", "typescript"]
        );
        assert_eq!(
            PackageManager::Bun.add_dev_args(&["typescript", "@types/node"]),
            vec!["add", "-d", "typescript", "@types/node"]
        );
    }

    #[test]
    fn test_init_args() {
        assert_eq!(PackageManager::Npm.init_args(true), vec!["init", "-y"]);
        assert_eq!(PackageManager::Npm.init_args(false), vec!["init"]);
        assert_eq!(PackageManager::Pnpm.init_args(true), vec!["init"]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("PNPM".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert!("cargo".parse::<PackageManager>().is_err());
    }
}
