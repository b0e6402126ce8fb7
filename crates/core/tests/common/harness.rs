//! Orchestrators wired to a scripted mock client.

use super::fixtures::*;
use ac_core::agents::adapters::{MockBehavior, MockClient, StaticClientFactory};
use ac_core::{AgentInvoker, ComparisonOrchestrator, PipelineEngine};
use ac_protocol::Locale;
use std::sync::Arc;

/// Delay of the slow agent, long enough to reorder completions.
pub const SLOW_DELAY_MS: u64 = 60;

/// A mock client that knows every fixture prompt. Unknown prompts echo.
pub fn scripted_client() -> MockClient {
    MockClient::echo()
        .with_behavior(UPPERCASE_PROMPT, MockBehavior::Uppercase)
        .with_behavior(REVERSE_PROMPT, MockBehavior::Reverse)
        .with_behavior(
            FAILING_PROMPT,
            MockBehavior::Fail("model overloaded".to_string()),
        )
        .with_behavior(SILENT_PROMPT, MockBehavior::Empty)
        .with_behavior(
            SLOW_PROMPT,
            MockBehavior::delayed(SLOW_DELAY_MS, MockBehavior::Uppercase),
        )
}

pub fn invoker(client: &MockClient) -> Arc<AgentInvoker> {
    let factory = Arc::new(StaticClientFactory::new(Arc::new(client.clone())));
    Arc::new(AgentInvoker::new(factory).with_locale(Locale::English))
}

#[allow(dead_code)]
pub fn pipeline_engine(client: &MockClient) -> PipelineEngine {
    PipelineEngine::new(invoker(client))
}

#[allow(dead_code)]
pub fn comparison(client: &MockClient) -> ComparisonOrchestrator {
    ComparisonOrchestrator::new(invoker(client))
}
