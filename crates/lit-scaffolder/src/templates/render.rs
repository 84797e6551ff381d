//! Text rewrites applied to templates and generated sources

use crate::color::{ColorPair, Rgb};
use crate::manifest::patch::{patch, Rule};
use crate::naming::{styles_file, styles_module};
use regex::Regex;
use std::sync::OnceLock;

/// Token in the style template replaced by the component type name
pub const STYLE_TOKEN: &str = "wcName";
/// Token in license templates replaced by the author
pub const AUTHOR_TOKEN: &str = "{{author}}";

/// The generator's import line in the main component module
pub const GENERATED_IMPORT: &str = "import { html, css, LitElement } from 'lit';";

/// Inline `static styles = css\`...\`;` block emitted by the generator
const INLINE_STYLES: &str = r"static styles = css`[^`]*`;";

static INLINE_STYLES_REGEX: OnceLock<Regex> = OnceLock::new();

fn inline_styles() -> &'static Regex {
    INLINE_STYLES_REGEX.get_or_init(|| Regex::new(INLINE_STYLES).expect("invalid regex pattern"))
}

/// Fill the style template for `type_name`
pub fn render_style(template: &str, type_name: &str) -> String {
    patch(template, &[Rule::literal(STYLE_TOKEN, type_name)])
}

/// Point the main module at the generated styles module instead of inline css
pub fn rewire_main_module(source: &str, type_name: &str) -> String {
    let module = styles_module(type_name);

    patch(
        source,
        &[
            Rule::regex(inline_styles().clone(), format!("static styles = [{}];", module)),
            Rule::literal(
                GENERATED_IMPORT,
                format!(
                    "import {{ html, LitElement }} from 'lit';\nimport {{ {} }} from './{}';",
                    module,
                    styles_file(type_name)
                ),
            )
            .first(),
        ],
    )
}

/// Fill the license template with the author
pub fn render_license(template: &str, author: &str) -> String {
    patch(template, &[Rule::literal(AUTHOR_TOKEN, author)])
}

/// Fill the editor settings template.
///
/// Each placeholder is replaced once, accent first. Word boundaries keep
/// `BGCOLOR` from matching inside `TITLEBGCOLOR`.
pub fn render_editor_settings(template: &str, accent: Rgb, title: ColorPair) -> String {
    let placeholder = |token: &str| {
        Regex::new(&format!(r"\b{}\b", token)).expect("placeholder pattern is valid")
    };

    patch(
        template,
        &[
            Rule::regex(placeholder("BGCOLOR"), accent.to_string()).first(),
            Rule::regex(placeholder("TITLEBGCOLOR"), title.background.to_string()).first(),
            Rule::regex(placeholder("TITLEFGCOLOR"), title.foreground.to_string()).first(),
        ],
    )
}
