//! Product configuration trait for CLI binaries
//!
//! This trait defines what a scaffolding binary has to supply: which
//! generator to run, which package manager to drive, where projects are
//! hosted and how it can be reconfigured from the environment.

use crate::pipeline::Scaffolded;
use crate::runtime::ShellCommand;

/// Configuration trait for scaffolding products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - The external project generator
/// - Package manager and repository host
/// - Environment variable overrides
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Command that generates the base project in the current directory
    fn generator(&self) -> ShellCommand;

    /// Package manager binary used for install, audit and registry lookups
    fn package_manager(&self) -> &'static str;

    /// Base URL the component repository will live under
    fn repository_host(&self) -> &'static str;

    /// Environment variable selecting an HTTP registry instead of the package manager
    fn registry_url_env(&self) -> &'static str;

    /// Environment variable pointing at a local template directory
    fn template_dir_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after the component is ready
    fn next_steps(&self, scaffolded: &Scaffolded) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
