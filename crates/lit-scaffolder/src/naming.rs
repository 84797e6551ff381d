//! Component naming helpers

/// Convert a kebab-case component identifier to its PascalCase type name.
///
/// `"my-component"` becomes `"MyComponent"`. Only the first character of each
/// segment changes case; the rest is kept as written.
pub fn derive_type_name(kebab: &str) -> String {
    kebab
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Module exporting the component's styles, e.g. `MyWcStyles`
pub fn styles_module(type_name: &str) -> String {
    format!("{}Styles", type_name)
}

/// File the styles module is written to, e.g. `MyWcStyles.js`
pub fn styles_file(type_name: &str) -> String {
    format!("{}.js", styles_module(type_name))
}

/// The generator's main component source file, e.g. `MyWc.js`
pub fn main_file(type_name: &str) -> String {
    format!("{}.js", type_name)
}
