//! Progress events.
//!
//! Orchestrators optionally report progress through a
//! `tokio::sync::mpsc::Sender<Event>`. Events are informational: the
//! returned report is always the source of truth, and a closed receiver
//! never changes how a pipeline or comparison runs.
//!
//! Uses tagged enum serialization for TypeScript compatibility:
//! ```json
//! {
//!   "type": "stepStarted",
//!   "payload": {
//!     "runId": "uuid-here",
//!     "stepIndex": 0,
//!     "agentId": "translator",
//!     "agentName": "Translator"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A pipeline run has begun.
    #[serde(rename_all = "camelCase")]
    PipelineStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        step_count: usize,
    },

    /// A step's invocation is about to be issued.
    #[serde(rename_all = "camelCase")]
    StepStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        step_index: usize,
        agent_id: String,
        agent_name: String,
    },

    /// A step produced output.
    #[serde(rename_all = "camelCase")]
    StepCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
        step_index: usize,
        duration_ms: u64,
    },

    /// A step failed; no further steps will run.
    #[serde(rename_all = "camelCase")]
    StepFailed {
        #[ts(type = "string")]
        run_id: Uuid,
        step_index: usize,
        error: String,
    },

    /// Every step succeeded.
    #[serde(rename_all = "camelCase")]
    PipelineCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// The run stopped at a failing step.
    #[serde(rename_all = "camelCase")]
    PipelineFailed {
        #[ts(type = "string")]
        run_id: Uuid,
        error: String,
    },

    /// One comparison branch has settled.
    #[serde(rename_all = "camelCase")]
    ComparisonBranchSettled { agent_id: String, succeeded: bool },
}

impl Event {
    /// Whether this event ends a pipeline run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::PipelineCompleted { .. } | Event::PipelineFailed { .. }
        )
    }
}
