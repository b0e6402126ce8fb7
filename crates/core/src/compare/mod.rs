//! Comparison orchestrator.
//!
//! Sends the same input to several agents at once and collects one
//! [`ComparisonResult`] per agent, positionally aligned with the input.
//! A failing branch only affects its own entry.

use crate::agents::{AgentInvoker, StepOutcome};
use crate::error::OrchestrationError;
use crate::media::ImageDataUri;
use crate::messages;
use ac_protocol::{AgentConfig, ComparisonResult, Event};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

pub struct ComparisonOrchestrator {
    invoker: Arc<AgentInvoker>,
    events_tx: Option<Sender<Event>>,
}

impl ComparisonOrchestrator {
    pub fn new(invoker: Arc<AgentInvoker>) -> Self {
        Self {
            invoker,
            events_tx: None,
        }
    }

    /// Report a `ComparisonBranchSettled` event as each branch finishes.
    pub fn with_events(mut self, events_tx: Sender<Event>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    /// Run every agent concurrently on the same input and wait for all of
    /// them.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Validation`] when `agents` is empty. Nothing
    /// is invoked in that case.
    pub async fn compare(
        &self,
        agents: &[AgentConfig],
        user_text: &str,
        image: Option<&ImageDataUri>,
    ) -> Result<Vec<ComparisonResult>, OrchestrationError> {
        if agents.is_empty() {
            return Err(OrchestrationError::Validation(
                messages::empty_comparison(self.invoker.locale()).to_string(),
            ));
        }

        tracing::debug!(agents = agents.len(), "starting comparison");

        let branches = agents
            .iter()
            .map(|agent| self.run_branch(agent, user_text, image));

        Ok(join_all(branches).await)
    }

    async fn run_branch(
        &self,
        agent: &AgentConfig,
        user_text: &str,
        image: Option<&ImageDataUri>,
    ) -> ComparisonResult {
        let outcome = self.invoker.invoke_step(agent, user_text, image).await;

        if let Some(tx) = &self.events_tx {
            let _ = tx
                .send(Event::ComparisonBranchSettled {
                    agent_id: agent.id.clone(),
                    succeeded: outcome.is_success(),
                })
                .await;
        }

        let (response_text, error_message) = match outcome {
            StepOutcome::Succeeded(text) => (Some(text), None),
            StepOutcome::Failed(error) => {
                tracing::warn!(agent = %agent.name, error = %error, "comparison branch failed");
                (None, Some(error))
            }
        };

        ComparisonResult {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            avatar_ref: agent.avatar_ref.clone(),
            response_text,
            error_message,
        }
    }
}
