//! Pipeline execution engine.
//!
//! The PipelineEngine runs an ordered list of agents, feeding each agent's
//! output into the next one. Execution is strictly sequential and stops at
//! the first failing step; the returned [`PipelineResult`] carries every
//! step that ran, including the failing one.

use crate::agents::{AgentInvoker, StepOutcome};
use crate::error::OrchestrationError;
use crate::media::ImageDataUri;
use crate::messages;
use ac_protocol::{
    Agent, AgentConfig, Event, Pipeline, PipelineExecutionRecord, PipelineResult,
    PipelineStepResult,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// The pipeline execution engine.
///
/// Holds no per-run state, so one engine can serve any number of runs.
pub struct PipelineEngine {
    invoker: Arc<AgentInvoker>,
    events_tx: Option<Sender<Event>>,
}

impl PipelineEngine {
    pub fn new(invoker: Arc<AgentInvoker>) -> Self {
        Self {
            invoker,
            events_tx: None,
        }
    }

    /// Attach a channel for progress events.
    ///
    /// Sending waits for channel capacity, so the receiver should be
    /// drained while the pipeline runs. A dropped receiver is ignored.
    pub fn with_events(mut self, events_tx: Sender<Event>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    /// Execute `steps` in order, starting from `initial_text`.
    ///
    /// The image, when present, is given to the first step only. Later
    /// steps receive nothing but the previous step's output.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::Validation`] when `steps` is empty.
    /// Agent failures are not errors: they end the run and are reported
    /// through `overall_error_message`.
    pub async fn execute_pipeline(
        &self,
        steps: &[AgentConfig],
        initial_text: &str,
        initial_image: Option<&ImageDataUri>,
    ) -> Result<PipelineResult, OrchestrationError> {
        let locale = self.invoker.locale();
        if steps.is_empty() {
            return Err(OrchestrationError::Validation(
                messages::empty_pipeline(locale).to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        self.emit(Event::PipelineStarted {
            run_id,
            step_count: steps.len(),
        })
        .await;

        let mut result = PipelineResult {
            initial_input_text: initial_text.to_string(),
            initial_image: initial_image.map(ToString::to_string),
            steps: Vec::with_capacity(steps.len()),
            final_output_text: None,
            overall_error_message: None,
        };
        let mut current_text = initial_text.to_string();

        for (step_index, agent) in steps.iter().enumerate() {
            let image = if step_index == 0 { initial_image } else { None };

            tracing::debug!(step = step_index, agent = %agent.name, "running pipeline step");
            self.emit(Event::StepStarted {
                run_id,
                step_index,
                agent_id: agent.id.clone(),
                agent_name: agent.name.clone(),
            })
            .await;

            let started = Instant::now();
            let outcome = self.invoker.invoke_step(agent, &current_text, image).await;
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match outcome {
                StepOutcome::Succeeded(output) => {
                    result.steps.push(PipelineStepResult {
                        agent_id: agent.id.clone(),
                        agent_name: agent.name.clone(),
                        input_text: current_text.clone(),
                        output_text: Some(output.clone()),
                        error_message: None,
                        duration_ms: Some(duration_ms),
                    });
                    self.emit(Event::StepCompleted {
                        run_id,
                        step_index,
                        duration_ms,
                    })
                    .await;
                    current_text = output;
                }
                StepOutcome::Failed(error) => {
                    tracing::warn!(
                        step = step_index,
                        agent = %agent.name,
                        error = %error,
                        "pipeline step failed"
                    );
                    result.steps.push(PipelineStepResult {
                        agent_id: agent.id.clone(),
                        agent_name: agent.name.clone(),
                        input_text: current_text.clone(),
                        output_text: None,
                        error_message: Some(error.clone()),
                        duration_ms: Some(duration_ms),
                    });
                    self.emit(Event::StepFailed {
                        run_id,
                        step_index,
                        error: error.clone(),
                    })
                    .await;

                    let overall = messages::pipeline_failed(locale, &agent.name, &error);
                    self.emit(Event::PipelineFailed {
                        run_id,
                        error: overall.clone(),
                    })
                    .await;
                    result.overall_error_message = Some(overall);
                    return Ok(result);
                }
            }
        }

        result.final_output_text = Some(current_text);
        self.emit(Event::PipelineCompleted { run_id }).await;

        Ok(result)
    }

    /// Run a stored pipeline, resolving its slots against `agents`.
    ///
    /// Every slot is resolved before the first invocation, so an unknown
    /// agent id fails the whole run without calling anything.
    pub async fn run_pipeline(
        &self,
        pipeline: &Pipeline,
        agents: &[Agent],
        initial_text: &str,
        initial_image: Option<&ImageDataUri>,
    ) -> Result<PipelineExecutionRecord, OrchestrationError> {
        let steps = resolve_steps(pipeline, agents)?;
        let result = self
            .execute_pipeline(&steps, initial_text, initial_image)
            .await?;

        Ok(PipelineExecutionRecord {
            pipeline_id: pipeline.id.clone(),
            pipeline_name: pipeline.name.clone(),
            total_duration_ms: result.total_duration_ms(),
            result,
            executed_at: Utc::now(),
        })
    }

    async fn emit(&self, event: Event) {
        if let Some(tx) = &self.events_tx {
            let _ = tx.send(event).await;
        }
    }
}

/// Map each slot of `pipeline` to the configuration of its agent.
pub fn resolve_steps(
    pipeline: &Pipeline,
    agents: &[Agent],
) -> Result<Vec<AgentConfig>, OrchestrationError> {
    pipeline
        .agent_sequence
        .iter()
        .map(|slot| {
            agents
                .iter()
                .find(|agent| agent.id == slot.agent_id)
                .map(AgentConfig::from)
                .ok_or_else(|| OrchestrationError::UnknownAgent {
                    agent_id: slot.agent_id.clone(),
                })
        })
        .collect()
}
