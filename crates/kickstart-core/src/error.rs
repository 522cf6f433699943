//! Error taxonomy for scaffolding and release flows
//!
//! Core operations return [`Error`]; the binary converts to `anyhow::Error`
//! at the CLI boundary. Nothing here is retried or recovered locally: every
//! variant stops the current run.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// Release kind was not one of patch, minor, major.
    #[error("Invalid release kind '{0}': expected patch, minor or major")]
    InvalidReleaseKind(String),

    /// An answer to a prompt (or its flag equivalent) could not be understood.
    #[error("Invalid choice '{0}': expected commit, stash or abort")]
    InvalidChoice(String),

    /// The component a release kind increments is already at its maximum.
    #[error("Cannot bump {version} ({kind}): version component overflow")]
    VersionOverflow {
        version: String,
        kind: crate::descriptor::ReleaseKind,
    },

    /// User chose to abort on a dirty working tree.
    #[error("Release aborted: working tree has uncommitted changes")]
    AbortedDirtyTree,

    /// User cancelled an interactive prompt.
    #[error("Cancelled")]
    Cancelled,

    #[error("Failed to read {}: {reason}", path.display())]
    DescriptorRead { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    DescriptorWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A scaffold file could not be written.
    #[error("Failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The executable could not be launched at all.
    #[error("Failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("{}", command_failed_message(command, args, *exit_code, stderr))]
    CommandFailed {
        command: String,
        args: Vec<String>,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// A release step failed after pending changes were stashed.
    #[error("{0}; pre-release changes are still stashed, run `git stash pop` to restore them")]
    StillStashed(Box<Error>),

    #[error("Missing required tools: {}", .0.join("; "))]
    MissingTools(Vec<String>),

    #[error("Invalid configuration in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

impl Error {
    /// Whether the run ended because the user asked it to.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, Error::AbortedDirtyTree | Error::Cancelled)
    }

    /// Whether the error describes bad input caught before any side effect.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidReleaseKind(_) | Error::InvalidChoice(_))
    }
}

impl From<std::io::Error> for Error {
    /// Prompt libraries surface cancellation as `Interrupted`.
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::Interrupted {
            Error::Cancelled
        } else {
            Error::Prompt(err)
        }
    }
}

fn command_failed_message(
    command: &str,
    args: &[String],
    exit_code: Option<i32>,
    stderr: &str,
) -> String {
    let mut line = if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    };
    match exit_code {
        Some(code) => line.push_str(&format!(" exited with code {}", code)),
        None => line.push_str(" was terminated by a signal"),
    }
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        line.push_str(": ");
        line.push_str(stderr.lines().next().unwrap_or(stderr));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_renders_first_stderr_line() {
        let err = Error::CommandFailed {
            command: "git".to_string(),
            args: vec!["push".to_string(), "--follow-tags".to_string()],
            exit_code: Some(128),
            stderr: "fatal: no upstream\nhint: set one\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "git push --follow-tags exited with code 128: fatal: no upstream"
        );
    }

    #[test]
    fn command_failed_without_exit_code() {
        let err = Error::CommandFailed {
            command: "npm".to_string(),
            args: vec![],
            exit_code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "npm was terminated by a signal");
    }

    #[test]
    fn interrupted_io_maps_to_cancelled() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c").into();
        assert!(err.is_user_abort());
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(Error::InvalidReleaseKind("beta".into()).is_invalid_input());
        assert!(!Error::AbortedDirtyTree.is_invalid_input());
    }
}
