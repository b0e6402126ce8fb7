//! Test fixtures for creating sample configurations and test data.

use ac_protocol::{Agent, AgentConfig};
use tempfile::TempDir;

/// System prompts the harness maps to mock behaviors.
pub const UPPERCASE_PROMPT: &str = "Convert the text to upper case.";
pub const REVERSE_PROMPT: &str = "Reverse the text.";
pub const FAILING_PROMPT: &str = "This agent always fails.";
pub const SILENT_PROMPT: &str = "This agent never answers.";
pub const SLOW_PROMPT: &str = "This agent takes its time.";

/// An [`AgentConfig`] whose name is the capitalized id.
pub fn agent_config(id: &str, system_prompt: &str) -> AgentConfig {
    AgentConfig::new(id, capitalize(id), system_prompt)
}

/// A stored [`Agent`] record.
#[allow(dead_code)]
pub fn stored_agent(id: &str, system_prompt: &str) -> Agent {
    Agent::new(id.to_string(), capitalize(id), system_prompt.to_string())
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Create a temporary project with a `.agent-console/` directory holding
/// an `upper` and a `reverse` agent and a pipeline running both.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path().join(".agent-console");

    std::fs::create_dir_all(root.join("agents"))?;
    std::fs::create_dir_all(root.join("pipelines"))?;

    std::fs::write(root.join("config.toml"), "provider = \"mock\"\nlocale = \"en\"\n")?;
    std::fs::write(
        root.join("agents/upper.md"),
        format!("---\nname: Upper\ndescription: Shouts\n---\n\n{UPPERCASE_PROMPT}\n"),
    )?;
    std::fs::write(
        root.join("agents/reverse.md"),
        format!("---\nname: Reverse\n---\n\n{REVERSE_PROMPT}\n"),
    )?;
    std::fs::write(
        root.join("pipelines/shout-back.yaml"),
        "name: Shout back\ndescription: Upper case, then reverse\nagents:\n  - upper\n  - reverse\n",
    )?;

    Ok(temp_dir)
}
