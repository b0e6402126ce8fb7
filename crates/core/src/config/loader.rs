//! Configuration file loader for the `.agent-console/` directory.
//!
//! Layout:
//! - `config.toml`: global settings
//! - `agents/*.md`: one agent per file, YAML front matter plus the system
//!   prompt as the Markdown body
//! - `pipelines/*.yaml` (or `.yml`): one pipeline per file

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::models::{AgentFrontMatter, AppConfig};
use ac_protocol::{Agent, GlobalConfig, Pipeline, PipelineDefinition};
use gray_matter::engine::YAML;
use gray_matter::Matter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the configuration directory under the project root.
pub const CONFIG_DIR: &str = ".agent-console";

pub fn config_dir(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR)
}

/// Loads all configuration under `root/.agent-console/`.
///
/// Missing directories and files yield defaults rather than errors.
///
/// # Errors
///
/// Returns `ConfigError` when a file exists but cannot be read or parsed.
///
/// # Example
///
/// ```rust,no_run
/// use ac_core::config::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} agents", config.agents.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let dir = config_dir(root);

    if !dir.exists() {
        tracing::debug!(path = %dir.display(), "no configuration directory, using defaults");
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&dir)?;
    let agents = load_agents(&dir)?;
    let pipelines = load_pipelines(&dir)?;

    tracing::debug!(
        agents = agents.len(),
        pipelines = pipelines.len(),
        "loaded configuration"
    );

    Ok(AppConfig {
        global,
        agents,
        pipelines,
    })
}

fn load_global_config(dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content = read(&config_path)?;
    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path,
        source,
    })
}

/// Files directly under `dir` with one of `extensions`, sorted by name.
fn definition_files(dir: &Path, extensions: &[&str]) -> ConfigResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        let ext = path.extension().and_then(|s| s.to_str());
        if entry.file_type().is_file() && ext.is_some_and(|ext| extensions.contains(&ext)) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn load_agents(dir: &Path) -> ConfigResult<Vec<Agent>> {
    definition_files(&dir.join("agents"), &["md"])?
        .iter()
        .map(|path| parse_agent(path, &read(path)?))
        .collect()
}

/// Parse one agent definition. The id falls back to the file stem and the
/// credential is read from the variable named by `credential-env`.
fn parse_agent(path: &Path, content: &str) -> ConfigResult<Agent> {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(content);

    let front: AgentFrontMatter = parsed
        .data
        .ok_or_else(|| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: "Missing YAML front matter".to_string(),
        })?
        .deserialize()
        .map_err(|e| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: format!("Failed to deserialize front matter: {e}"),
        })?;

    let id = front
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| file_stem(path));

    let api_key = front.credential_env.as_deref().and_then(|var| {
        let value = std::env::var(var).ok();
        if value.is_none() {
            tracing::warn!(agent = %id, env = var, "credential variable is not set");
        }
        value
    });

    Ok(Agent::new(id, front.name, parsed.content.trim().to_string())
        .with_description(front.description)
        .with_avatar_url(front.avatar_url)
        .with_api_key(api_key))
}

fn load_pipelines(dir: &Path) -> ConfigResult<Vec<Pipeline>> {
    definition_files(&dir.join("pipelines"), &["yaml", "yml"])?
        .iter()
        .map(|path| parse_pipeline(path, &read(path)?))
        .collect()
}

fn parse_pipeline(path: &Path, content: &str) -> ConfigResult<Pipeline> {
    let mut definition: PipelineDefinition =
        serde_yaml::from_str(content).map_err(|source| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?;

    if definition.id.trim().is_empty() {
        definition.id = file_stem(path);
    }

    if definition.agents.is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "pipeline must list at least one agent".to_string(),
        });
    }

    Ok(Pipeline::from(definition))
}
