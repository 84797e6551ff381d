//! Template lookup from the binary itself or from a local directory

use super::manifest::TemplateManifest;
use crate::license::LicenseKind;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Name of the manifest at the root of a template directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// Where template files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateStore {
    /// Templates compiled into the binary
    Embedded,
    /// A directory containing `template.yaml` and the files it names
    Local(PathBuf),
}

impl TemplateStore {
    /// Explicit directory first, then the product's environment override, then embedded
    pub fn resolve<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Self {
        template_dir
            .or_else(|| std::env::var_os(config.template_dir_env()).map(PathBuf::from))
            .map(Self::Local)
            .unwrap_or(Self::Embedded)
    }

    /// Read a template file by name
    pub fn read(&self, file: &str) -> Result<String> {
        match self {
            TemplateStore::Embedded => embedded(file)
                .map(str::to_string)
                .with_context(|| format!("No embedded template named '{}'", file)),
            TemplateStore::Local(dir) => {
                let path = dir.join(file);
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read template {}", path.display()))
            }
        }
    }

    pub fn manifest(&self) -> Result<TemplateManifest> {
        let content = self.read(MANIFEST_FILE)?;
        serde_yaml::from_str(&content).context("Failed to parse template.yaml")
    }

    pub fn style(&self) -> Result<String> {
        self.read(&self.manifest()?.style)
    }

    pub fn editor_settings(&self) -> Result<String> {
        self.read(&self.manifest()?.editor_settings)
    }

    pub fn license(&self, kind: LicenseKind) -> Result<String> {
        self.read(&self.manifest()?.license_file(kind))
    }
}

fn embedded(file: &str) -> Option<&'static str> {
    let content = match file {
        MANIFEST_FILE => include_str!("../../templates/template.yaml"),
        "wc-name-style.js" => include_str!("../../templates/wc-name-style.js"),
        "vscode-settings.json" => include_str!("../../templates/vscode-settings.json"),
        "LICENSE_MIT.md" => include_str!("../../templates/LICENSE_MIT.md"),
        "LICENSE_APACHE-2.0.md" => include_str!("../../templates/LICENSE_APACHE-2.0.md"),
        "LICENSE_ISC.md" => include_str!("../../templates/LICENSE_ISC.md"),
        "LICENSE_GPL-3.0.md" => include_str!("../../templates/LICENSE_GPL-3.0.md"),
        _ => return None,
    };
    Some(content)
}
