//! Shared helpers for kickstart-core integration tests

#![allow(dead_code)]

use kickstart_core::{CapturedOutput, CommandRunner, Error, ProjectContext, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// How a faked command should end
#[derive(Debug, Clone)]
pub enum Response {
    Ok(String),
    Fail { code: i32, stderr: String },
    /// Write `content` to `path` (relative to the project) and succeed
    Creates { path: String, content: String },
}

/// Records every command and answers from a script; unknown commands succeed
/// with empty output.
pub struct FakeRunner {
    root: std::path::PathBuf,
    responses: HashMap<String, Response>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the response for an exact command line, e.g. `"git status --porcelain"`.
    pub fn on(mut self, command_line: &str, response: Response) -> Self {
        self.responses.insert(command_line.to_string(), response);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, program: &str, args: &[&str]) -> Result<String> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(line.clone());

        match self.responses.get(&line) {
            None => Ok(String::new()),
            Some(Response::Ok(stdout)) => Ok(stdout.clone()),
            Some(Response::Fail { code, stderr }) => Err(Error::CommandFailed {
                command: program.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
                exit_code: Some(*code),
                stderr: stderr.clone(),
            }),
            Some(Response::Creates { path, content }) => {
                std::fs::write(self.root.join(path), content).unwrap();
                Ok(String::new())
            }
        }
    }
}

impl CommandRunner for FakeRunner {
    async fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()> {
        self.respond(program, args).map(|_| ())
    }

    async fn run_captured(&self, program: &str, args: &[&str]) -> Result<CapturedOutput> {
        self.respond(program, args).map(|stdout| CapturedOutput {
            stdout,
            stderr: String::new(),
        })
    }
}

/// A temp project holding `package_json`
pub fn project(package_json: &str) -> (TempDir, ProjectContext) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("package.json"), package_json).unwrap();
    let ctx = ProjectContext::new(dir.path());
    (dir, ctx)
}

pub fn read(dir: &TempDir, relative: &str) -> String {
    std::fs::read_to_string(dir.path().join(relative)).unwrap()
}
