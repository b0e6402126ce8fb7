//! Wiring of configuration, store and orchestrators for one invocation.

use ac_core::agents::{build_client_factory, AgentInvoker};
use ac_core::config::{config_dir, load_config, AppConfig};
use ac_core::store::{Catalog, JsonFileStore};
use ac_core::ImageDataUri;
use ac_protocol::{Agent, Pipeline};
use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Console {
    pub root: PathBuf,
    pub config: AppConfig,
    pub catalog: Catalog,
}

impl Console {
    pub async fn load(root: &Path, force_mock: bool) -> Result<Self> {
        let mut config = load_config(root)
            .await
            .wrap_err_with(|| format!("failed to load configuration from {}", root.display()))?;
        if force_mock {
            config.global.provider = "mock".to_string();
        }

        let store_dir = match &config.global.store_dir {
            Some(dir) => root.join(dir),
            None => config_dir(root).join("store"),
        };
        tracing::debug!(store = %store_dir.display(), provider = %config.global.provider, "console ready");

        Ok(Self {
            root: root.to_path_buf(),
            catalog: Catalog::new(Arc::new(JsonFileStore::new(store_dir))),
            config,
        })
    }

    pub fn invoker(&self) -> Result<Arc<AgentInvoker>> {
        let factory = build_client_factory(&self.config.global)
            .wrap_err("failed to set up the generation provider")?;
        Ok(Arc::new(
            AgentInvoker::new(factory).with_locale(self.config.global.locale),
        ))
    }

    /// Configured agents overlaid with stored ones; a stored agent replaces
    /// a configured agent with the same id.
    pub fn agents(&self) -> Vec<Agent> {
        merge(self.config.agents.clone(), self.catalog.agents(), |a| &a.id)
    }

    pub fn pipelines(&self) -> Vec<Pipeline> {
        merge(self.config.pipelines.clone(), self.catalog.pipelines(), |p| &p.id)
    }

    /// Find an agent by id, then by name (case-insensitive).
    pub fn find_agent(&self, id_or_name: &str) -> Result<Agent> {
        let agents = self.agents();
        find(&agents, id_or_name, |a| (&a.id, &a.name))
            .cloned()
            .ok_or_else(|| eyre!("agent '{id_or_name}' not found"))
    }

    pub fn find_pipeline(&self, id_or_name: &str) -> Result<Pipeline> {
        let pipelines = self.pipelines();
        find(&pipelines, id_or_name, |p| (&p.id, &p.name))
            .cloned()
            .ok_or_else(|| eyre!("pipeline '{id_or_name}' not found"))
    }

    pub fn is_configured_agent(&self, id: &str) -> bool {
        self.config.agents.iter().any(|agent| agent.id == id)
    }

    pub fn is_configured_pipeline(&self, id: &str) -> bool {
        self.config.pipelines.iter().any(|pipeline| pipeline.id == id)
    }
}

fn merge<T, F>(configured: Vec<T>, stored: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> &String,
{
    let mut merged: Vec<T> = configured
        .into_iter()
        .filter(|item| !stored.iter().any(|s| id(s) == id(item)))
        .collect();
    merged.extend(stored);
    merged
}

fn find<'a, T, F>(items: &'a [T], id_or_name: &str, keys: F) -> Option<&'a T>
where
    F: Fn(&T) -> (&String, &String),
{
    let needle = id_or_name.trim();
    items
        .iter()
        .find(|item| keys(item).0 == needle)
        .or_else(|| {
            items
                .iter()
                .find(|item| keys(item).1.eq_ignore_ascii_case(needle))
        })
}

pub fn load_image(path: Option<&Path>) -> Result<Option<ImageDataUri>> {
    path.map(|path| {
        ImageDataUri::from_file(path)
            .wrap_err_with(|| format!("failed to attach image {}", path.display()))
    })
    .transpose()
}

/// Lower-case slug of `name`: letters and digits joined by single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// The id for a new record: the explicit one, else a slug of the name.
pub fn new_id(explicit: Option<String>, name: &str) -> Result<String> {
    let id = explicit.unwrap_or_else(|| slugify(name));
    if id.trim().is_empty() {
        bail!("cannot derive an id from '{name}'; pass --id");
    }
    Ok(id)
}
