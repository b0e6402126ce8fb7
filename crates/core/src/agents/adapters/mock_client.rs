//! Mock generation client for testing and offline runs.

use crate::agents::base::{ClientFactory, GenerationClient, GenerationError, GenerationRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// What a [`MockClient`] does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Return the user text unchanged.
    Echo,
    /// Return the user text in upper case.
    Uppercase,
    /// Return the user text reversed.
    Reverse,
    /// Return a fixed response.
    Respond(String),
    /// Answer without any text.
    Empty,
    /// Fail with [`GenerationError::Execution`].
    Fail(String),
    /// Sleep, then behave as the inner behavior.
    Delayed { delay_ms: u64, then: Box<MockBehavior> },
}

impl MockBehavior {
    pub fn delayed(delay_ms: u64, then: MockBehavior) -> Self {
        Self::Delayed {
            delay_ms,
            then: Box::new(then),
        }
    }
}

/// A scripted client. Behaviors are keyed by the request's system prompt,
/// so one client can play several agents.
///
/// Every request is recorded when it arrives, and the system prompt is
/// recorded again when its response is ready.
#[derive(Clone)]
pub struct MockClient {
    default: MockBehavior,
    behaviors: HashMap<String, MockBehavior>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
    completions: Arc<Mutex<Vec<String>>>,
}

impl MockClient {
    pub fn new(default: MockBehavior) -> Self {
        Self {
            default,
            behaviors: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            completions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Use `behavior` for requests carrying `system_prompt`.
    pub fn with_behavior(mut self, system_prompt: &str, behavior: MockBehavior) -> Self {
        self.behaviors.insert(system_prompt.to_string(), behavior);
        self
    }

    /// All requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for one system prompt.
    pub fn calls_for(&self, system_prompt: &str) -> Vec<GenerationRequest> {
        self.calls()
            .into_iter()
            .filter(|call| call.system_prompt == system_prompt)
            .collect()
    }

    /// System prompts in the order their responses became ready.
    pub fn completion_order(&self) -> Vec<String> {
        self.completions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn behavior_for(&self, system_prompt: &str) -> MockBehavior {
        self.behaviors
            .get(system_prompt)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

async fn apply(
    behavior: MockBehavior,
    user_text: &str,
) -> Result<Option<String>, GenerationError> {
    let mut behavior = behavior;
    loop {
        match behavior {
            MockBehavior::Delayed { delay_ms, then } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                behavior = *then;
            }
            MockBehavior::Echo => return Ok(Some(user_text.to_string())),
            MockBehavior::Uppercase => return Ok(Some(user_text.to_uppercase())),
            MockBehavior::Reverse => return Ok(Some(user_text.chars().rev().collect())),
            MockBehavior::Respond(text) => return Ok(Some(text)),
            MockBehavior::Empty => return Ok(None),
            MockBehavior::Fail(message) => return Err(GenerationError::Execution(message)),
        }
    }
}

#[async_trait]
impl GenerationClient for MockClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<String>, GenerationError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let result = apply(self.behavior_for(&request.system_prompt), &request.user_text).await;

        self.completions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.system_prompt.clone());

        result
    }
}

/// Hands the same client to every credential, recording what was asked for.
pub struct StaticClientFactory {
    client: Arc<dyn GenerationClient>,
    requested: Mutex<Vec<Option<String>>>,
}

impl StaticClientFactory {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Credentials passed to [`ClientFactory::client_for`], in call order.
    pub fn requested_credentials(&self) -> Vec<Option<String>> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ClientFactory for StaticClientFactory {
    fn client_for(
        &self,
        credential: Option<&str>,
    ) -> Result<Arc<dyn GenerationClient>, GenerationError> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(credential.map(str::to_string));
        Ok(Arc::clone(&self.client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::prompt::build_request;

    #[tokio::test]
    async fn test_mock_client_transforms() {
        let client = MockClient::echo()
            .with_behavior("upper", MockBehavior::Uppercase)
            .with_behavior("reverse", MockBehavior::Reverse);

        let upper = client.generate(&build_request("upper", "ab", None)).await;
        let reverse = client.generate(&build_request("reverse", "ab", None)).await;
        let echo = client.generate(&build_request("other", "ab", None)).await;

        assert_eq!(upper, Ok(Some("AB".to_string())));
        assert_eq!(reverse, Ok(Some("ba".to_string())));
        assert_eq!(echo, Ok(Some("ab".to_string())));
        assert_eq!(client.calls().len(), 3);
        assert_eq!(client.calls_for("upper").len(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_failure_and_empty() {
        let client = MockClient::new(MockBehavior::Fail("Mock failure".to_string()))
            .with_behavior("silent", MockBehavior::Empty);

        let failed = client.generate(&build_request("any", "x", None)).await;
        let empty = client.generate(&build_request("silent", "x", None)).await;

        assert_eq!(
            failed,
            Err(GenerationError::Execution("Mock failure".to_string()))
        );
        assert_eq!(empty, Ok(None));
    }

    #[tokio::test]
    async fn test_mock_client_delay_records_completion_order() {
        let client = MockClient::echo()
            .with_behavior("slow", MockBehavior::delayed(40, MockBehavior::Echo));

        let slow_request = build_request("slow", "1", None);
        let fast_request = build_request("fast", "2", None);
        let (slow, fast) = tokio::join!(
            client.generate(&slow_request),
            client.generate(&fast_request)
        );

        assert_eq!(slow, Ok(Some("1".to_string())));
        assert_eq!(fast, Ok(Some("2".to_string())));
        assert_eq!(client.completion_order(), vec!["fast", "slow"]);
    }

    #[test]
    fn test_static_factory_records_credentials() {
        let factory = StaticClientFactory::new(Arc::new(MockClient::echo()));
        let first = factory.client_for(None).unwrap();
        let second = factory.client_for(Some("key")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            factory.requested_credentials(),
            vec![None, Some("key".to_string())]
        );
    }
}
