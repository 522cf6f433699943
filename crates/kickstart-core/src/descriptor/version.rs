//! Version parsing and release-kind bumps

use crate::error::{Error, Result};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Which component of the version a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReleaseKind {
    #[default]
    Patch,
    Minor,
    Major,
}

impl ReleaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseKind::Patch => "patch",
            ReleaseKind::Minor => "minor",
            ReleaseKind::Major => "major",
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patch" => Ok(ReleaseKind::Patch),
            "minor" => Ok(ReleaseKind::Minor),
            "major" => Ok(ReleaseKind::Major),
            _ => Err(Error::InvalidReleaseKind(s.trim().to_string())),
        }
    }
}

/// Parse a descriptor version leniently.
///
/// Only the first three dot-separated components are read. A missing or
/// non-numeric component becomes 0, so `"abc"` is `0.0.0` and `"1.2"` is
/// `1.2.0`. Pre-release and build suffixes make their component non-numeric.
pub fn parse_lenient(version_str: &str) -> Version {
    let mut parts = version_str.trim().split('.');
    let mut next = || {
        parts
            .next()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .unwrap_or(0)
    };
    let major = next();
    let minor = next();
    let patch = next();
    Version::new(major, minor, patch)
}

/// Compute the next version for a release kind.
///
/// Fails instead of wrapping when the bumped component is already `u64::MAX`.
pub fn bump(current: &Version, kind: ReleaseKind) -> Result<Version> {
    let overflow = || Error::VersionOverflow {
        version: current.to_string(),
        kind,
    };
    let next = match kind {
        ReleaseKind::Patch => Version::new(
            current.major,
            current.minor,
            current.patch.checked_add(1).ok_or_else(overflow)?,
        ),
        ReleaseKind::Minor => {
            Version::new(current.major, current.minor.checked_add(1).ok_or_else(overflow)?, 0)
        }
        ReleaseKind::Major => Version::new(current.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
    };
    Ok(next)
}

/// Parse then bump a version string.
pub fn bump_str(current: &str, kind: ReleaseKind) -> Result<String> {
    Ok(bump(&parse_lenient(current), kind)?.to_string())
}
