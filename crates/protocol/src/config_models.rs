//! Global configuration models for `.agent-console/config.toml`.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Language used for the fixed user-facing messages of the core.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

/// Represents global settings from `.agent-console/config.toml`.
///
/// # Example
///
/// ```toml
/// # .agent-console/config.toml
/// provider = "gemini"
/// model = "gemini-2.0-flash"
/// api-key-env = "GEMINI_API_KEY"
/// locale = "en"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Generation provider: `gemini` or `mock`.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the shared default credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default)]
    pub locale: Locale,

    /// Directory of the key-value store, relative to the project root.
    ///
    /// Defaults to `.agent-console/store`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            locale: Locale::default(),
            store_dir: None,
        }
    }
}
