//! Templates used to finish a generated component
//!
//! This module provides:
//! - The template manifest type (`template.yaml`)
//! - Template lookup from embedded files or a local directory
//! - The text rewrites that turn templates and generated sources into output

pub mod manifest;
pub mod render;
pub mod store;

pub use manifest::TemplateManifest;
pub use render::{render_editor_settings, render_license, render_style, rewire_main_module};
pub use store::TemplateStore;
