//! External program execution and runtime detection
//!
//! This module provides:
//! - The `CommandExecutor` capability every external invocation goes through
//! - Pre-flight detection of Node.js and npm

pub mod check;
pub mod command;

pub use check::{check_node, check_package_manager, check_runtimes, RuntimeInfo};
pub use command::{CommandExecutor, ExecError, ShellCommand, SystemExecutor};
