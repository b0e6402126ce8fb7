//! Pipeline models: stored definitions and execution reports.
//!
//! A pipeline threads one text value through an ordered list of agents,
//! each agent's output becoming the next agent's input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One slot in a pipeline's agent sequence.
///
/// The same agent may occupy several slots, so each slot carries its own id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct PipelineAgentStep {
    pub id: String,
    pub agent_id: String,
}

/// A stored pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Ordered sequence of agents.
    pub agent_sequence: Vec<PipelineAgentStep>,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,

    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Pipeline {
    /// Create a pipeline from agent ids. Slot ids are `{id}-{index}`.
    pub fn new(id: String, name: String, agent_ids: Vec<String>) -> Self {
        let now = Utc::now();
        let agent_sequence = agent_ids
            .into_iter()
            .enumerate()
            .map(|(index, agent_id)| PipelineAgentStep {
                id: format!("{id}-{index}"),
                agent_id,
            })
            .collect();

        Self {
            id,
            name,
            description: String::new(),
            agent_sequence,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }
}

/// Pipeline definition as written in `.agent-console/pipelines/*.yaml`.
///
/// # Example
///
/// ```yaml
/// id: translate-then-summarize
/// name: Translate then summarize
/// description: Translates the input and summarizes the translation
/// agents:
///   - translator
///   - summarizer
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct PipelineDefinition {
    /// Defaults to the file stem when loaded from `pipelines/*.yaml`.
    #[serde(default)]
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Agent ids in execution order.
    pub agents: Vec<String>,
}

impl From<PipelineDefinition> for Pipeline {
    fn from(definition: PipelineDefinition) -> Self {
        Pipeline::new(definition.id, definition.name, definition.agents)
            .with_description(definition.description)
    }
}

/// The record of one executed step.
///
/// Exactly one of `output_text` and `error_message` is set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStepResult {
    pub agent_id: String,
    pub agent_name: String,

    /// What this agent received.
    pub input_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// The report of one pipeline execution.
///
/// If `overall_error_message` is set, `final_output_text` is absent and
/// `steps` is a prefix of the configured sequence ending in the failing
/// step. Otherwise `steps` has one entry per configured agent and
/// `final_output_text` equals the last step's output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub initial_input_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_image: Option<String>,

    pub steps: Vec<PipelineStepResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_output_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_error_message: Option<String>,
}

impl PipelineResult {
    pub fn succeeded(&self) -> bool {
        self.overall_error_message.is_none()
    }

    /// Sum of the recorded step durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().filter_map(|step| step.duration_ms).sum()
    }
}

/// A [`PipelineResult`] stamped with the stored pipeline it came from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecutionRecord {
    pub pipeline_id: String,
    pub pipeline_name: String,
    pub result: PipelineResult,

    pub total_duration_ms: u64,

    #[ts(type = "string")]
    pub executed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_new_assigns_slot_ids() {
        let pipeline = Pipeline::new(
            "p1".to_string(),
            "Pipe".to_string(),
            vec!["a".to_string(), "a".to_string(), "b".to_string()],
        );

        let slot_ids: Vec<_> = pipeline.agent_sequence.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(slot_ids, vec!["p1-0", "p1-1", "p1-2"]);
        assert_eq!(pipeline.agent_sequence[1].agent_id, "a");
    }

    #[test]
    fn test_total_duration_skips_missing_values() {
        let step = |duration_ms| PipelineStepResult {
            agent_id: "a".to_string(),
            agent_name: "A".to_string(),
            input_text: "x".to_string(),
            output_text: Some("y".to_string()),
            error_message: None,
            duration_ms,
        };
        let result = PipelineResult {
            initial_input_text: "x".to_string(),
            initial_image: None,
            steps: vec![step(Some(5)), step(None), step(Some(7))],
            final_output_text: Some("y".to_string()),
            overall_error_message: None,
        };

        assert_eq!(result.total_duration_ms(), 12);
        assert!(result.succeeded());
    }
}
