//! Child process execution
//!
//! Two modes: interactive commands share the terminal so they can prompt the
//! user themselves (`npm init`, `npm publish` asking for an OTP), and captured
//! commands collect stdout/stderr for parsing (`git status`).

use crate::context::ProjectContext;
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command as TokioCommand;

/// Output collected from a captured command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Launches external commands and waits for them to exit.
///
/// Implemented by [`ProcessRunner`] for real processes and by recording fakes
/// in tests.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run with inherited stdin/stdout/stderr. Succeeds only on exit status 0.
    async fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Run with piped output. Succeeds only on exit status 0.
    async fn run_captured(&self, program: &str, args: &[&str]) -> Result<CapturedOutput>;
}

/// Runs commands in the project root with the context environment applied
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    cwd: PathBuf,
    env: Vec<(String, String)>,
}

impl ProcessRunner {
    pub fn new(ctx: &ProjectContext) -> Self {
        Self {
            cwd: ctx.root().to_path_buf(),
            env: ctx
                .env()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    fn command(&self, program: &str, args: &[&str]) -> TokioCommand {
        let mut cmd = TokioCommand::new(program);
        cmd.args(args)
            .current_dir(&self.cwd)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .kill_on_drop(true);
        cmd
    }
}

impl CommandRunner for ProcessRunner {
    async fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()> {
        tracing::debug!(program, ?args, cwd = %self.cwd.display(), "running interactive command");

        let status = self
            .command(program, args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| spawn_error(program, source))?;

        check_status(program, args, status, String::new())
    }

    async fn run_captured(&self, program: &str, args: &[&str]) -> Result<CapturedOutput> {
        tracing::debug!(program, ?args, cwd = %self.cwd.display(), "running captured command");

        let output = self
            .command(program, args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| spawn_error(program, source))?;

        let captured = CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        check_status(program, args, output.status, captured.stderr.clone())?;
        Ok(captured)
    }
}

fn spawn_error(program: &str, source: std::io::Error) -> Error {
    tracing::debug!(program, error = %source, "failed to launch");
    Error::Spawn {
        command: program.to_string(),
        source,
    }
}

fn check_status(program: &str, args: &[&str], status: ExitStatus, stderr: String) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    tracing::debug!(program, code = ?status.code(), "command failed");
    Err(Error::CommandFailed {
        command: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        exit_code: status.code(),
        stderr,
    })
}
