use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const CLI_EXAMPLES: &str = "Examples:\n\
  agent-console init\n\
  agent-console agents list\n\
  agent-console agents add --name Poet --prompt \"Answer in verse.\"\n\
  agent-console chat translator \"Bonjour tout le monde\"\n\
  agent-console compare \"Explain Rust lifetimes\" --agents translator,summarizer\n\
  agent-console run translate-summarize \"...\" --image diagram.png\n\
  agent-console --mock --json run translate-summarize \"offline dry run\"";

#[derive(Debug, Parser)]
#[command(name = "agent-console")]
#[command(version, about = "Manage LLM agents: chat, compare and chain them into pipelines")]
#[command(after_long_help = CLI_EXAMPLES)]
pub struct Cli {
    /// Project root containing `.agent-console/`.
    #[arg(long, global = true, env = "AGENT_CONSOLE_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Log filter, e.g. `info` or `ac_core=debug`. `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Use the offline mock provider regardless of `config.toml`.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Create a starter .agent-console/ directory")]
    Init {
        /// Overwrite an existing directory.
        #[arg(long, default_value_t = false)]
        force: bool,
        /// Only write one pipeline and its two agents.
        #[arg(long, default_value_t = false)]
        minimal: bool,
    },
    #[command(subcommand, about = "List, inspect, add and remove agents")]
    Agents(AgentCommands),
    #[command(subcommand, about = "List, inspect, add and remove pipelines")]
    Pipelines(PipelineCommands),
    #[command(about = "Send one message to an agent")]
    Chat {
        /// Agent id or name.
        agent: String,
        text: String,
        #[command(flatten)]
        image: ImageArg,
    },
    #[command(about = "Show (or clear) the chat history with an agent")]
    History {
        agent: String,
        #[arg(long, default_value_t = false)]
        clear: bool,
    },
    #[command(about = "Send the same message to several agents at once")]
    Compare {
        text: String,
        /// Comma-separated agent ids or names.
        #[arg(long, required = true, value_delimiter = ',')]
        agents: Vec<String>,
        #[command(flatten)]
        image: ImageArg,
    },
    #[command(about = "Run a pipeline on an input")]
    Run {
        /// Pipeline id or name.
        pipeline: String,
        text: String,
        #[command(flatten)]
        image: ImageArg,
    },
}

#[derive(Debug, Args)]
pub struct ImageArg {
    /// Image file to attach (png, jpg, gif, webp, bmp).
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum AgentCommands {
    #[command(about = "List agents from the store and the config directory")]
    List,
    #[command(about = "Show one agent, including its system prompt")]
    Show { agent: String },
    #[command(about = "Add or replace an agent in the store")]
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        prompt: String,
        /// Defaults to a slug of the name.
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        avatar_url: Option<String>,
        /// API key used for this agent instead of the default one.
        #[arg(long)]
        api_key: Option<String>,
    },
    #[command(about = "Remove an agent from the store")]
    Remove { agent: String },
}

#[derive(Debug, Subcommand)]
pub enum PipelineCommands {
    #[command(about = "List pipelines from the store and the config directory")]
    List,
    #[command(about = "Show one pipeline and its agent sequence")]
    Show { pipeline: String },
    #[command(about = "Add or replace a pipeline in the store")]
    Add {
        #[arg(long)]
        name: String,
        /// Comma-separated agent ids or names, in execution order.
        #[arg(long, required = true, value_delimiter = ',')]
        agents: Vec<String>,
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    #[command(about = "Remove a pipeline from the store")]
    Remove { pipeline: String },
}
