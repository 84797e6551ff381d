//! Runtime detection for Node.js and npm

use super::command::{CommandExecutor, ShellCommand};
use anyhow::Result;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Probe `<program> --version` through the executor
fn check_program<E: CommandExecutor + ?Sized>(
    executor: &E,
    name: &'static str,
    program: &str,
) -> RuntimeInfo {
    match executor.execute(&ShellCommand::new(program).arg("--version")) {
        Ok(stdout) => RuntimeInfo {
            name,
            version: Some(stdout.trim().to_string()),
            available: true,
        },
        Err(_) => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node<E: CommandExecutor + ?Sized>(executor: &E) -> RuntimeInfo {
    check_program(executor, "Node.js", "node")
}

/// Check if the package manager is available
pub fn check_package_manager<E: CommandExecutor + ?Sized>(
    executor: &E,
    program: &str,
) -> RuntimeInfo {
    check_program(executor, "npm", program)
}

/// Check everything the pipeline shells out to; fails listing whatever is missing.
pub fn check_runtimes<E: CommandExecutor + ?Sized>(
    executor: &E,
    package_manager: &str,
) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    let node = check_node(executor);
    if node.available {
        results.push(node);
    } else {
        missing.push("Node.js (install from https://nodejs.org)");
    }

    let npm = check_package_manager(executor, package_manager);
    if npm.available {
        results.push(npm);
    } else {
        missing.push("npm (ships with Node.js)");
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}
