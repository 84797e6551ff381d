//! Lit Scaffolder - finish a generated Lit web component project
//!
//! The external open-wc generator produces a bare project. This library turns
//! it into something ready to publish: package.json metadata and dependency
//! versions, a separate styles module, a license and editor settings.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Manifest patching, version resolution,
//!   naming, color generation, template rendering
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the
//!   `Scaffolder` pipeline over injected collaborators
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use lit_scaffolder::{pipeline, manifest, runtime, templates};
//!
//! let executor = runtime::SystemExecutor;
//! let registry = manifest::NpmRegistry::new(&executor, "npm");
//! let store = templates::TemplateStore::Embedded;
//! let settings = pipeline::ScaffoldSettings::from_config(&MyConfig, ".");
//! let mut scaffolder = pipeline::Scaffolder::new(&executor, &registry, &store, settings);
//! let outcome = scaffolder.run(choices, &mut pipeline::ConsoleProgress)?;
//! ```

pub mod color;
pub mod license;
pub mod logging;
pub mod manifest;
pub mod naming;
pub mod pipeline;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use color::{generate_contrasting_pair, ColorPair, Rgb};
pub use license::LicenseKind;
pub use logging::init_logging;
pub use manifest::{patch, Registry, Rule};
pub use naming::derive_type_name;
pub use pipeline::{Choices, Outcome, Scaffolded, Scaffolder, StepFailure};
pub use product::ProductConfig;
pub use runtime::{CommandExecutor, ShellCommand, SystemExecutor};
pub use templates::TemplateStore;

#[cfg(feature = "tui")]
pub use tui::run;
