//! Comparison models: the same prompt answered by several agents.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One agent's entry in a comparison report.
///
/// Exactly one of `response_text` and `error_message` is set. A report is
/// a `Vec<ComparisonResult>` positionally aligned with the agents that were
/// compared.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub agent_id: String,
    pub agent_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ComparisonResult {
    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}
