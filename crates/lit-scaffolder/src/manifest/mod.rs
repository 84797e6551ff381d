//! package.json handling
//!
//! The manifest is kept as raw text and rewritten through [`patch::Rule`]s so
//! the generator's formatting survives. Structured parsing is only used for
//! read-only lookups: the package name and the dependency groups.

pub mod patch;
pub mod resolve;
pub mod rules;

use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub use patch::{patch, Occurrence, Pattern, Rule};
pub use resolve::{resolve_group, HttpRegistry, NpmRegistry, Registry, RegistryError};
pub use rules::{identity_rules, provenance_rule, Provenance};

/// File name of the manifest inside a generated project
pub const MANIFEST_FILE: &str = "package.json";

/// Errors from read-only manifest inspection
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("package.json is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("package.json has no string \"name\" field")]
    MissingName,

    #[error("\"{group}\" in package.json is not an object")]
    InvalidGroup { group: &'static str },

    #[error("constraint for \"{name}\" in \"{group}\" is not a string")]
    InvalidConstraint { group: &'static str, name: String },
}

/// The two dependency groups whose constraints get pinned to the latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyGroup {
    Dependencies,
    DevDependencies,
}

impl DependencyGroup {
    /// Resolution order
    pub const ALL: [DependencyGroup; 2] = [
        DependencyGroup::Dependencies,
        DependencyGroup::DevDependencies,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DependencyGroup::Dependencies => "dependencies",
            DependencyGroup::DevDependencies => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A declared dependency and its constraint, as written in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub constraint: String,
}

/// Extract the component identifier from the manifest `name` field
pub fn component_name(text: &str) -> Result<String, ManifestError> {
    let document: Value = serde_json::from_str(text)?;
    document
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ManifestError::MissingName)
}

/// Read one dependency group in declaration order; a missing group is empty
pub fn dependencies(text: &str, group: DependencyGroup) -> Result<Vec<Dependency>, ManifestError> {
    let document: Value = serde_json::from_str(text)?;
    let entries = match document.get(group.key()) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(entries)) => entries,
        Some(_) => return Err(ManifestError::InvalidGroup { group: group.key() }),
    };

    entries
        .iter()
        .map(|(name, constraint)| {
            constraint
                .as_str()
                .map(|constraint| Dependency {
                    name: name.clone(),
                    constraint: constraint.to_string(),
                })
                .ok_or_else(|| ManifestError::InvalidConstraint {
                    group: group.key(),
                    name: name.clone(),
                })
        })
        .collect()
}
