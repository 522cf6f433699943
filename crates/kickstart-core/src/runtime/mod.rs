//! External process execution and tool detection
//!
//! This module provides:
//! - The `CommandRunner` seam and its real process implementation
//! - Preflight detection of git, Node.js and the package manager

pub mod check;
pub mod runner;

pub use check::{check_tool, check_tools, Tool, ToolInfo};
pub use runner::{CapturedOutput, CommandRunner, ProcessRunner};
