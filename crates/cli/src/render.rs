//! Human-readable and JSON output.

use ac_protocol::{
    Agent, ChatSession, ComparisonResult, Event, Message, MessageRole, Pipeline,
    PipelineExecutionRecord,
};
use color_eyre::Result;
use colored::Colorize;
use serde::Serialize;

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn source_tag(configured: bool) -> colored::ColoredString {
    if configured {
        "config".dimmed()
    } else {
        "store".dimmed()
    }
}

pub fn agent_list(agents: &[Agent], is_configured: impl Fn(&str) -> bool) {
    if agents.is_empty() {
        println!("{}", "No agents yet. Run `agent-console init` or `agents add`.".yellow());
        return;
    }
    for agent in agents {
        let key = if agent.api_key.is_some() { " 🔑" } else { "" };
        println!(
            "{}  {}{}  [{}]",
            agent.id.bold(),
            agent.name,
            key,
            source_tag(is_configured(&agent.id))
        );
        if !agent.description.is_empty() {
            println!("    {}", agent.description.dimmed());
        }
    }
}

pub fn agent_detail(agent: &Agent) {
    println!("{} {}", "Agent:".bold(), agent.name);
    println!("{} {}", "Id:".bold(), agent.id);
    if !agent.description.is_empty() {
        println!("{} {}", "Description:".bold(), agent.description);
    }
    if let Some(avatar) = &agent.avatar_url {
        println!("{} {avatar}", "Avatar:".bold());
    }
    println!(
        "{} {}",
        "API key:".bold(),
        if agent.api_key.is_some() { "own key" } else { "default" }
    );
    println!("{}", "System prompt:".bold());
    println!("{}", agent.system_prompt);
}

pub fn pipeline_list(pipelines: &[Pipeline], is_configured: impl Fn(&str) -> bool) {
    if pipelines.is_empty() {
        println!("{}", "No pipelines yet. Run `agent-console init` or `pipelines add`.".yellow());
        return;
    }
    for pipeline in pipelines {
        let chain: Vec<_> = pipeline
            .agent_sequence
            .iter()
            .map(|step| step.agent_id.as_str())
            .collect();
        println!(
            "{}  {}  [{}]",
            pipeline.id.bold(),
            pipeline.name,
            source_tag(is_configured(&pipeline.id))
        );
        println!("    {}", chain.join(" → ").dimmed());
    }
}

pub fn pipeline_detail(pipeline: &Pipeline, agents: &[Agent]) {
    println!("{} {}", "Pipeline:".bold(), pipeline.name);
    println!("{} {}", "Id:".bold(), pipeline.id);
    if !pipeline.description.is_empty() {
        println!("{} {}", "Description:".bold(), pipeline.description);
    }
    for (index, step) in pipeline.agent_sequence.iter().enumerate() {
        let name = agents
            .iter()
            .find(|agent| agent.id == step.agent_id)
            .map(|agent| agent.name.normal())
            .unwrap_or_else(|| "missing agent".red());
        println!("  {}. {} ({name})", index + 1, step.agent_id);
    }
}

pub fn reply(agent: &Agent, message: &Message) {
    println!("{}", format!("{}:", agent.name).cyan().bold());
    println!("{}", message.content);
}

pub fn history(agent: &Agent, session: &ChatSession) {
    if session.messages.is_empty() {
        println!("{}", format!("No messages with {} yet.", agent.name).yellow());
        return;
    }
    for message in &session.messages {
        let who = match message.role {
            MessageRole::User => "You".green().bold(),
            MessageRole::Agent => agent.name.cyan().bold(),
            MessageRole::System => "System".dimmed(),
        };
        let time = message.timestamp.format("%Y-%m-%d %H:%M").to_string();
        println!("{who} {}", time.dimmed());
        println!("{}", message.content);
        if message.image_url.is_some() {
            println!("{}", "[image attached]".dimmed());
        }
        println!();
    }
}

pub fn comparison(results: &[ComparisonResult]) {
    for result in results {
        println!("{}", format!("── {} ({})", result.agent_name, result.agent_id).bold());
        match (&result.response_text, &result.error_message) {
            (Some(text), _) => println!("{text}"),
            (None, Some(error)) => println!("{}", format!("✗ {error}").red()),
            (None, None) => {}
        }
        println!();
    }
}

pub fn execution(record: &PipelineExecutionRecord) {
    let result = &record.result;
    println!("{}", format!("Pipeline: {}", record.pipeline_name).bold());
    for (index, step) in result.steps.iter().enumerate() {
        let duration = step
            .duration_ms
            .map(|ms| format!(" {ms}ms"))
            .unwrap_or_default();
        match (&step.output_text, &step.error_message) {
            (Some(output), _) => {
                println!(
                    "{} {}{}",
                    format!("{}. ✓", index + 1).green(),
                    step.agent_name.bold(),
                    duration.dimmed()
                );
                println!("{output}");
            }
            (None, error) => {
                println!(
                    "{} {}{}",
                    format!("{}. ✗", index + 1).red(),
                    step.agent_name.bold(),
                    duration.dimmed()
                );
                if let Some(error) = error {
                    println!("{}", error.red());
                }
            }
        }
        println!();
    }

    match (&result.final_output_text, &result.overall_error_message) {
        (Some(output), _) => {
            println!("{}", "Final output:".green().bold());
            println!("{output}");
        }
        (None, Some(error)) => println!("{}", error.red().bold()),
        (None, None) => {}
    }
    println!(
        "{}",
        format!("Total: {}ms", record.total_duration_ms).dimmed()
    );
}

/// One progress line on stderr.
pub fn progress(event: &Event) {
    let line = match event {
        Event::PipelineStarted { step_count, .. } => {
            format!("▶ running {step_count} step(s)").cyan()
        }
        Event::StepStarted {
            step_index,
            agent_name,
            ..
        } => format!("  {}. {agent_name}…", step_index + 1).normal(),
        Event::StepCompleted {
            step_index,
            duration_ms,
            ..
        } => format!("  {}. done in {duration_ms}ms", step_index + 1).green(),
        Event::StepFailed {
            step_index, error, ..
        } => format!("  {}. failed: {error}", step_index + 1).red(),
        Event::PipelineCompleted { .. } => "✓ pipeline completed".green(),
        Event::PipelineFailed { .. } => "✗ pipeline failed".red(),
        Event::ComparisonBranchSettled {
            agent_id,
            succeeded,
        } => {
            if *succeeded {
                format!("  ✓ {agent_id}").green()
            } else {
                format!("  ✗ {agent_id}").red()
            }
        }
    };
    eprintln!("{line}");
}
