//! Subcommand handlers.

use crate::cli::{AgentCommands, Commands, PipelineCommands};
use crate::console::{load_image, new_id, Console};
use crate::render;
use ac_core::init::{generate_console_structure, InitOptions};
use ac_core::{ChatService, ComparisonOrchestrator, PipelineEngine};
use ac_protocol::{Agent, AgentConfig, Event, Pipeline};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tokio::sync::mpsc;

pub async fn run(command: Commands, root: &Path, json: bool, mock: bool) -> Result<ExitCode> {
    let command = match command {
        Commands::Init { force, minimal } => return init(root, force, minimal, json).await,
        other => other,
    };
    let console = Console::load(root, mock).await?;
    dispatch(&console, command, json).await
}

async fn dispatch(console: &Console, command: Commands, json: bool) -> Result<ExitCode> {
    match command {
        Commands::Init { .. } => bail!("init does not take a loaded console"),
        Commands::Agents(command) => agents(console, command, json),
        Commands::Pipelines(command) => pipelines(console, command, json),
        Commands::Chat { agent, text, image } => {
            chat(console, &agent, &text, image.image.as_deref(), json).await
        }
        Commands::History { agent, clear } => history(console, &agent, clear, json),
        Commands::Compare {
            text,
            agents,
            image,
        } => compare(console, &agents, &text, image.image.as_deref(), json).await,
        Commands::Run {
            pipeline,
            text,
            image,
        } => run_pipeline(console, &pipeline, &text, image.image.as_deref(), json).await,
    }
}

async fn init(root: &Path, force: bool, minimal: bool, json: bool) -> Result<ExitCode> {
    let written = generate_console_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force,
        minimal,
    })
    .await?;

    if json {
        render::json(&written)?;
    } else {
        println!("{}", "Initialized .agent-console/".green().bold());
        for path in &written {
            println!("  {path}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn agents(console: &Console, command: AgentCommands, json: bool) -> Result<ExitCode> {
    match command {
        AgentCommands::List => {
            let agents = console.agents();
            if json {
                render::json(&agents)?;
            } else {
                render::agent_list(&agents, |id| console.is_configured_agent(id));
            }
        }
        AgentCommands::Show { agent } => {
            let agent = console.find_agent(&agent)?;
            if json {
                render::json(&agent)?;
            } else {
                render::agent_detail(&agent);
            }
        }
        AgentCommands::Add {
            name,
            prompt,
            id,
            description,
            avatar_url,
            api_key,
        } => {
            if prompt.trim().is_empty() {
                bail!("the system prompt cannot be empty");
            }
            let id = new_id(id, &name)?;
            let agent = Agent::new(id, name, prompt)
                .with_description(description)
                .with_avatar_url(avatar_url)
                .with_api_key(api_key);
            let stored = console
                .catalog
                .upsert_agent(agent)
                .wrap_err("failed to save agent")?;
            if json {
                render::json(&stored)?;
            } else {
                println!("{} {}", "Saved agent".green(), stored.id.bold());
            }
        }
        AgentCommands::Remove { agent } => {
            let agent = console.find_agent(&agent)?;
            if !console.catalog.delete_agent(&agent.id)? {
                bail!(
                    "agent '{}' is defined in {}; delete its file instead",
                    agent.id,
                    console.root.join(".agent-console/agents").display()
                );
            }
            if console.is_configured_agent(&agent.id) {
                tracing::info!(agent = %agent.id, "configured agent definition is visible again");
            }
            if json {
                render::json(&agent)?;
            } else {
                println!("{} {}", "Removed agent".yellow(), agent.id.bold());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn pipelines(console: &Console, command: PipelineCommands, json: bool) -> Result<ExitCode> {
    match command {
        PipelineCommands::List => {
            let pipelines = console.pipelines();
            if json {
                render::json(&pipelines)?;
            } else {
                render::pipeline_list(&pipelines, |id| console.is_configured_pipeline(id));
            }
        }
        PipelineCommands::Show { pipeline } => {
            let pipeline = console.find_pipeline(&pipeline)?;
            if json {
                render::json(&pipeline)?;
            } else {
                render::pipeline_detail(&pipeline, &console.agents());
            }
        }
        PipelineCommands::Add {
            name,
            agents,
            id,
            description,
        } => {
            let agent_ids = agents
                .iter()
                .map(|agent| console.find_agent(agent).map(|agent| agent.id))
                .collect::<Result<Vec<_>>>()?;
            if agent_ids.is_empty() {
                bail!("a pipeline needs at least one agent");
            }
            let id = new_id(id, &name)?;
            let pipeline = Pipeline::new(id, name, agent_ids).with_description(description);
            let stored = console
                .catalog
                .upsert_pipeline(pipeline)
                .wrap_err("failed to save pipeline")?;
            if json {
                render::json(&stored)?;
            } else {
                println!("{} {}", "Saved pipeline".green(), stored.id.bold());
            }
        }
        PipelineCommands::Remove { pipeline } => {
            let pipeline = console.find_pipeline(&pipeline)?;
            if !console.catalog.delete_pipeline(&pipeline.id)? {
                bail!(
                    "pipeline '{}' is defined in {}; delete its file instead",
                    pipeline.id,
                    console.root.join(".agent-console/pipelines").display()
                );
            }
            if json {
                render::json(&pipeline)?;
            } else {
                println!("{} {}", "Removed pipeline".yellow(), pipeline.id.bold());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn chat(
    console: &Console,
    agent: &str,
    text: &str,
    image: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let agent = console.find_agent(agent)?;
    let image = load_image(image)?;
    let service = ChatService::new(console.invoker()?, console.catalog.clone());

    let reply = service
        .send(&agent, text, image.as_ref())
        .await
        .wrap_err_with(|| format!("chat with '{}' failed", agent.name))?;

    if json {
        render::json(&reply)?;
    } else {
        render::reply(&agent, &reply);
    }
    Ok(ExitCode::SUCCESS)
}

/// Reads and clears go straight to the catalog, so no provider is needed.
fn history(console: &Console, agent: &str, clear: bool, json: bool) -> Result<ExitCode> {
    let agent = console.find_agent(agent)?;

    let session = if clear {
        let session = console
            .catalog
            .clear_session(&agent.id)
            .wrap_err("failed to clear chat history")?;
        if !json {
            println!("{} {}", "Cleared history with".yellow(), agent.name.bold());
        }
        session
    } else {
        console.catalog.session(&agent.id)
    };

    if json {
        render::json(&session)?;
    } else if !clear {
        render::history(&agent, &session);
    }
    Ok(ExitCode::SUCCESS)
}

async fn compare(
    console: &Console,
    agents: &[String],
    text: &str,
    image: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let configs = agents
        .iter()
        .map(|agent| console.find_agent(agent).map(|agent| AgentConfig::from(&agent)))
        .collect::<Result<Vec<_>>>()?;
    let image = load_image(image)?;

    let (tx, rx) = mpsc::channel(configs.len().max(1));
    let printer = tokio::spawn(print_progress(rx, json));

    let results = ComparisonOrchestrator::new(console.invoker()?)
        .with_events(tx)
        .compare(&configs, text, image.as_ref())
        .await;
    let _ = printer.await;
    let results = results?;

    if json {
        render::json(&results)?;
    } else {
        render::comparison(&results);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_pipeline(
    console: &Console,
    pipeline: &str,
    text: &str,
    image: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let pipeline = console.find_pipeline(pipeline)?;
    let image = load_image(image)?;

    let (tx, rx) = mpsc::channel(32);
    let printer = tokio::spawn(print_progress(rx, json));

    let record = PipelineEngine::new(console.invoker()?)
        .with_events(tx)
        .run_pipeline(&pipeline, &console.agents(), text, image.as_ref())
        .await;
    let _ = printer.await;
    let record = record?;

    if json {
        render::json(&record)?;
    } else {
        render::execution(&record);
    }

    if record.result.succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print progress events until the sender is dropped. Silent in JSON mode,
/// where stderr is left to logs.
async fn print_progress(mut rx: mpsc::Receiver<Event>, json: bool) {
    while let Some(event) = rx.recv().await {
        if !json {
            render::progress(&event);
        }
    }
}
