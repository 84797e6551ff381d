//! Template manifest types and parsing

use crate::license::LicenseKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Template manifest (templates/template.yaml)
/// Names the files used to finish a generated component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Styles module template; `wcName` is replaced by the component type name
    pub style: String,

    /// Editor settings template with BGCOLOR/TITLEBGCOLOR/TITLEFGCOLOR placeholders
    pub editor_settings: String,

    /// License text per license kind (optional, falls back to the naming convention)
    #[serde(default)]
    pub licenses: HashMap<LicenseKind, String>,
}

impl TemplateManifest {
    /// Template file holding the text for `kind`
    pub fn license_file(&self, kind: LicenseKind) -> String {
        self.licenses
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.template_file())
    }
}
