//! State threaded through one scaffold run

use crate::license::LicenseKind;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Answers collected before the pipeline starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices {
    /// GitHub user or author name
    pub author: String,
    pub license: LicenseKind,
    /// Whether the user confirmed the run
    pub start: bool,
}

/// Mutable state owned by the orchestrator for the duration of a run.
///
/// Fields start empty and are filled in by the step that derives them; later
/// steps read them through the accessors, which fail if that step has not run.
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    pub choices: Choices,
    /// Generated project root, set once the pipeline has moved into it
    pub project_dir: Option<PathBuf>,
    /// Kebab-case name from package.json, e.g. `my-wc`
    pub component: Option<String>,
    /// PascalCase type name, e.g. `MyWc`
    pub type_name: Option<String>,
    /// Raw package.json text, rewritten in place by the manifest steps
    pub manifest: String,
    /// Ordinal of the step currently running (1-based, 0 before the first)
    pub step: usize,
}

impl ScaffoldContext {
    pub fn new(choices: Choices) -> Self {
        Self {
            choices,
            project_dir: None,
            component: None,
            type_name: None,
            manifest: String::new(),
            step: 0,
        }
    }

    pub fn project_dir(&self) -> Result<&Path> {
        self.project_dir
            .as_deref()
            .context("project directory has not been located yet")
    }

    pub fn component(&self) -> Result<&str> {
        self.component
            .as_deref()
            .context("component name has not been read from package.json yet")
    }

    pub fn type_name(&self) -> Result<&str> {
        self.type_name
            .as_deref()
            .context("component type name has not been derived yet")
    }
}
