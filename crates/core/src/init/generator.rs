//! Directory structure and file generation for `agent-console init`.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::config_dir;
use std::fs;
use std::path::{Path, PathBuf};

/// Templates written in minimal mode.
const MINIMAL_TEMPLATES: &[&str] = &[
    "agents/translator.md",
    "agents/summarizer.md",
    "pipelines/translate-summarize.yaml",
];

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Project root; `.agent-console/` is created inside it.
    pub target_dir: PathBuf,

    /// Overwrite an existing `.agent-console/`.
    pub force: bool,

    /// Only write the translate-and-summarize example.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a starter `.agent-console/` directory:
///
/// ```text
/// .agent-console/
/// ├── config.toml
/// ├── agents/
/// │   ├── critic.md (unless minimal)
/// │   ├── summarizer.md
/// │   └── translator.md
/// └── pipelines/
///     ├── draft-review.yaml (unless minimal)
///     └── translate-summarize.yaml
/// ```
///
/// Returns the paths written, relative to `.agent-console/`.
///
/// # Errors
///
/// [`InitError::DirectoryExists`] when the directory exists and `force` is
/// not set; I/O failures otherwise.
pub async fn generate_console_structure(options: InitOptions) -> InitResult<Vec<String>> {
    let dir = config_dir(&options.target_dir);

    if dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(dir));
    }

    for sub in ["agents", "pipelines"] {
        let path = dir.join(sub);
        fs::create_dir_all(&path).map_err(|source| InitError::DirectoryCreate { path, source })?;
    }

    let mut templates = vec!["config.toml".to_string()];
    if options.minimal {
        templates.extend(MINIMAL_TEMPLATES.iter().map(|path| path.to_string()));
    } else {
        templates.extend(list_templates("agents/"));
        templates.extend(list_templates("pipelines/"));
    }

    for template in &templates {
        write_template_file(&dir, template)?;
    }

    tracing::info!(path = %dir.display(), files = templates.len(), "initialized agent console");
    Ok(templates)
}

fn write_template_file(dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })
}
