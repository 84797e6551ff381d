//! Dependency version resolution against the npm registry
//!
//! Every declared dependency is pinned to `^<latest published version>`. The
//! rewrite is textual: the exact `"<name>": "<constraint>"` pair is searched
//! and its first occurrence replaced, so two entries sharing an identical
//! name/constraint pair would collide. Registry failures are not handled
//! here; they propagate to the caller.

use super::patch::{patch, Rule};
use super::rules::field;
use super::{dependencies, DependencyGroup, ManifestError};
use crate::runtime::command::{CommandExecutor, ExecError, ShellCommand};
use semver::Version;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Failure to learn a package's latest published version
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Command(#[from] ExecError),

    #[error("registry request for '{package}' failed: {source}")]
    Http {
        package: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid registry URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("registry returned an invalid version for '{package}': '{raw}'")]
    InvalidVersion {
        package: String,
        raw: String,
        #[source]
        source: semver::Error,
    },
}

/// Failure while pinning a dependency group
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Source of the latest published version of a package
///
/// `project_dir` is the project being scaffolded; lookups that shell out run
/// there so project-level registry configuration (`.npmrc`) applies.
pub trait Registry {
    fn latest_version(&self, package: &str, project_dir: &Path) -> Result<Version, RegistryError>;
}

impl<T: Registry + ?Sized> Registry for &T {
    fn latest_version(&self, package: &str, project_dir: &Path) -> Result<Version, RegistryError> {
        (**self).latest_version(package, project_dir)
    }
}

/// Parse a version printed by a registry, tolerating whitespace and a leading 'v'
pub fn parse_version(package: &str, raw: &str) -> Result<Version, RegistryError> {
    let trimmed = raw.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|source| RegistryError::InvalidVersion {
        package: package.to_string(),
        raw: trimmed.to_string(),
        source,
    })
}

/// Registry lookups through `npm view <package> version`
pub struct NpmRegistry<E> {
    executor: E,
    program: String,
}

impl<E: CommandExecutor> NpmRegistry<E> {
    pub fn new(executor: E, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }
}

impl<E: CommandExecutor> Registry for NpmRegistry<E> {
    fn latest_version(&self, package: &str, project_dir: &Path) -> Result<Version, RegistryError> {
        let command = ShellCommand::new(&self.program)
            .args(["view", package, "version"])
            .current_dir(project_dir);
        let stdout = self.executor.execute(&command)?;
        parse_version(package, &stdout)
    }
}

/// The subset of a registry's `/<package>/latest` document we need
#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

/// Registry lookups over the npm registry HTTP protocol
pub struct HttpRegistry {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpRegistry {
    pub fn new(base: &str, user_agent: &str) -> Result<Self, RegistryError> {
        let base = Url::parse(base).map_err(|e| RegistryError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(RegistryError::InvalidUrl {
                url: base.to_string(),
                reason: "URL cannot have path segments".to_string(),
            });
        }

        Ok(Self {
            base,
            client: reqwest::blocking::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
        })
    }

    /// `<base>/<package>/latest`; the scope separator of `@scope/name` is percent-encoded
    pub fn package_url(&self, package: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(package).push("latest");
        }
        url
    }
}

impl Registry for HttpRegistry {
    fn latest_version(&self, package: &str, _project_dir: &Path) -> Result<Version, RegistryError> {
        let url = self.package_url(package);
        debug!(%url, "querying registry");

        let http_error = |source| RegistryError::Http {
            package: package.to_string(),
            source,
        };
        let latest: LatestManifest = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(http_error)?;

        parse_version(package, &latest.version)
    }
}

/// Pin every dependency of `group` to the registry's latest version.
///
/// Queries run one at a time in declaration order; the first failure aborts.
pub fn resolve_group<R: Registry + ?Sized>(
    text: &str,
    group: DependencyGroup,
    registry: &R,
    project_dir: &Path,
) -> Result<String, ResolveError> {
    let declared = dependencies(text, group)?;
    let mut current = text.to_string();

    for dependency in declared {
        info!(package = %dependency.name, %group, "checking latest version");
        let version = registry.latest_version(&dependency.name, project_dir)?;

        let searched = field(&dependency.name, &dependency.constraint);
        let replaced_by = field(&dependency.name, &format!("^{}", version));
        debug!(%searched, %replaced_by, "pinning dependency");

        current = patch(&current, &[Rule::literal(searched, replaced_by).first()]);
    }

    Ok(current)
}
