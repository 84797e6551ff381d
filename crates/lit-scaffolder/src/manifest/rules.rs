//! The concrete rewrite rules applied to a freshly generated package.json
//!
//! These assume the shape produced by the open-wc generator. If a future
//! generator version formats a field differently the matching rule simply
//! stops applying.

use super::patch::Rule;
use crate::license::LicenseKind;

/// License the generator writes by default
pub const DEFAULT_LICENSE: &str = "MIT";
/// Version the generator writes by default
pub const DEFAULT_VERSION: &str = "0.0.0";
/// Version a scaffolded component starts at
pub const INITIAL_RELEASE: &str = "1.0.0";
/// Entry point the generator writes by default
pub const DEFAULT_ENTRY_POINT: &str = "index.js";
/// Field after which the project links are inserted
pub const PROVENANCE_ANCHOR: &str = "\"customElements\": \"custom-elements.json\",";

/// Render a `"key": "value"` pair the way the generator formats it
pub fn field(key: &str, value: &str) -> String {
    format!("\"{}\": \"{}\"", key, value)
}

/// Author, license, version and entry point rewrites, in application order.
///
/// The generator fills `author` with the package name, which is what the
/// first rule keys on.
pub fn identity_rules(component: &str, author: &str, license: LicenseKind) -> Vec<Rule> {
    vec![
        Rule::literal(field("author", component), field("author", author)),
        Rule::literal(
            field("license", DEFAULT_LICENSE),
            field("license", license.id()),
        ),
        Rule::literal(
            field("version", DEFAULT_VERSION),
            field("version", INITIAL_RELEASE),
        ),
        Rule::literal(
            field("main", DEFAULT_ENTRY_POINT),
            field("main", &format!("{}.js", component)),
        ),
    ]
}

/// Home, repository and issue tracker links for a hosted component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub home: String,
    pub repository: String,
    pub bugs: String,
}

impl Provenance {
    /// Links for `<host>/<author>/<component>`, e.g. on https://github.com
    pub fn new(host: &str, author: &str, component: &str) -> Self {
        let host = host.trim_end_matches('/');
        let home = format!("{}/{}/{}", host, author, component);
        Self {
            repository: format!("git+{}.git", home),
            bugs: format!("{}/issues", home),
            home,
        }
    }
}

/// Insert the links right after [`PROVENANCE_ANCHOR`]
pub fn provenance_rule(links: &Provenance) -> Rule {
    let insertion = [
        field("home", &links.home),
        field("repository", &links.repository),
        field("bugs", &links.bugs),
    ]
    .iter()
    .map(|line| format!("\n  {},", line))
    .collect::<String>();

    Rule::literal(PROVENANCE_ANCHOR, format!("{}{}", PROVENANCE_ANCHOR, insertion)).first()
}
