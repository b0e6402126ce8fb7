//! Starter files embedded at compile time.
//!
//! With the `debug-embed` feature the files are embedded in debug builds
//! too, so tests see exactly what a release binary ships.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates"]
pub struct TemplateAssets;

/// Content of one template, by path relative to the templates root
/// (e.g. `"agents/translator.md"`).
///
/// ```
/// use ac_core::init::get_template;
///
/// let config = get_template("config.toml").unwrap();
/// assert!(config.contains("provider ="));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// Template paths starting with `prefix`, sorted.
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
