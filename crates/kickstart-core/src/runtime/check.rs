//! Detection of the external tools kickstart drives

use crate::config::PackageManager;
use crate::error::{Error, Result};
use std::fmt;
use std::process::Command;

/// External tools a flow may need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Git,
    Node,
    PackageManager(PackageManager),
}

impl Tool {
    pub fn program(&self) -> &'static str {
        match self {
            Tool::Git => "git",
            Tool::Node => "node",
            Tool::PackageManager(pm) => pm.program(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Git => "Git",
            Tool::Node => "Node.js",
            Tool::PackageManager(pm) => pm.display_name(),
        }
    }

    fn install_hint(&self) -> &'static str {
        match self {
            Tool::Git => "install from https://git-scm.com",
            Tool::Node => "install from https://nodejs.org",
            Tool::PackageManager(pm) => pm.install_hint(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub tool: Tool,
    pub version: Option<String>,
    pub available: bool,
}

/// Probe `<program> --version`
pub fn check_tool(tool: Tool) -> ToolInfo {
    let output = Command::new(tool.program()).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            ToolInfo {
                tool,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            tool,
            version: None,
            available: false,
        },
    }
}

/// Check every tool, failing with the full list of missing ones.
pub fn check_tools(tools: &[Tool]) -> Result<Vec<ToolInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    for tool in tools {
        if results.iter().any(|r: &ToolInfo| r.tool == *tool) {
            continue;
        }
        let info = check_tool(*tool);
        if info.available {
            results.push(info);
        } else {
            missing.push(format!("{} ({})", tool.display_name(), tool.install_hint()));
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingTools(missing));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_manager_tool_uses_its_program() {
        assert_eq!(Tool::PackageManager(PackageManager::Pnpm).program(), "pnpm");
        assert_eq!(Tool::Git.program(), "git");
    }

    #[test]
    fn test_empty_check_succeeds() {
        assert!(check_tools(&[]).unwrap().is_empty());
    }
}
