//! Configuration models that aggregate all settings.

use ac_protocol::{Agent, GlobalConfig, Pipeline};
use serde::Deserialize;

/// Everything loaded from the `.agent-console/` directory.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Agents defined in `agents/*.md`, sorted by file name.
    pub agents: Vec<Agent>,

    /// Pipelines defined in `pipelines/*.yaml`, sorted by file name.
    pub pipelines: Vec<Pipeline>,
}

/// YAML front matter of an agent Markdown file.
///
/// ```yaml
/// ---
/// name: Translator
/// description: Translates anything into English
/// avatar-url: https://placehold.co/100x100.png
/// credential-env: TRANSLATOR_API_KEY
/// ---
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentFrontMatter {
    /// Defaults to the file stem.
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Environment variable holding this agent's own API key.
    #[serde(default)]
    pub credential_env: Option<String>,
}
