//! License kinds offered for new components

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SPDX license a new component can be published under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum LicenseKind {
    #[serde(rename = "MIT")]
    #[value(name = "MIT")]
    Mit,
    #[default]
    #[serde(rename = "Apache-2.0")]
    #[value(name = "Apache-2.0")]
    Apache2,
    #[serde(rename = "ISC")]
    #[value(name = "ISC")]
    Isc,
    #[serde(rename = "GPL-3.0")]
    #[value(name = "GPL-3.0")]
    Gpl3,
}

impl LicenseKind {
    /// Selection order shown in prompts
    pub const ALL: [LicenseKind; 4] = [
        LicenseKind::Mit,
        LicenseKind::Apache2,
        LicenseKind::Isc,
        LicenseKind::Gpl3,
    ];

    /// SPDX identifier written into package.json
    pub fn id(&self) -> &'static str {
        match self {
            LicenseKind::Mit => "MIT",
            LicenseKind::Apache2 => "Apache-2.0",
            LicenseKind::Isc => "ISC",
            LicenseKind::Gpl3 => "GPL-3.0",
        }
    }

    /// Conventional template file name, e.g. `LICENSE_APACHE-2.0.md`
    pub fn template_file(&self) -> String {
        format!("LICENSE_{}.md", self.id().to_uppercase())
    }
}

impl fmt::Display for LicenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
