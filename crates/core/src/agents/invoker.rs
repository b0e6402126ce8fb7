//! Single-agent invocation.
//!
//! [`AgentInvoker`] wraps the generation boundary with the fixed prompt
//! template and credential routing. It exposes two views of the same call:
//!
//! - [`AgentInvoker::invoke`] masks an empty output with the localized
//!   fallback message. Used by chat.
//! - [`AgentInvoker::invoke_step`] folds every outcome into a
//!   [`StepOutcome`], reporting an empty output as a failure. Used by the
//!   comparison and pipeline orchestrators.

use crate::agents::base::{ClientFactory, GenerationError};
use crate::agents::prompt::build_request;
use crate::media::ImageDataUri;
use crate::messages;
use ac_protocol::{AgentConfig, ChatResult, ChatTurn, Locale};
use std::sync::Arc;

/// Outcome of one invocation as seen by an orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded(String),
    Failed(String),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded(_))
    }
}

pub struct AgentInvoker {
    factory: Arc<dyn ClientFactory>,
    locale: Locale,
}

impl AgentInvoker {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            locale: Locale::default(),
        }
    }

    /// Set the locale of the fallback and error messages.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Invoke one agent, substituting the fallback message for an empty
    /// output. Only failures of the generation call itself are errors.
    pub async fn invoke(
        &self,
        config: &AgentConfig,
        user_text: &str,
        image: Option<&ImageDataUri>,
    ) -> Result<ChatResult, GenerationError> {
        let output = self
            .generate(&config.system_prompt, config.credential.as_deref(), user_text, image)
            .await?;

        Ok(self.with_fallback(output))
    }

    /// Invoke from a raw [`ChatTurn`], validating its image data URI.
    pub async fn invoke_turn(&self, turn: &ChatTurn) -> Result<ChatResult, GenerationError> {
        let image = turn
            .image_data_uri
            .as_deref()
            .map(str::parse::<ImageDataUri>)
            .transpose()
            .map_err(|e| GenerationError::InvalidRequest(e.to_string()))?;

        let output = self
            .generate(
                &turn.system_prompt,
                turn.credential.as_deref(),
                &turn.user_text,
                image.as_ref(),
            )
            .await?;

        Ok(self.with_fallback(output))
    }

    /// Invoke one agent on behalf of an orchestrator.
    ///
    /// Never fails: generation errors and empty outputs both become
    /// [`StepOutcome::Failed`] with a displayable message.
    pub async fn invoke_step(
        &self,
        config: &AgentConfig,
        user_text: &str,
        image: Option<&ImageDataUri>,
    ) -> StepOutcome {
        match self
            .generate(&config.system_prompt, config.credential.as_deref(), user_text, image)
            .await
        {
            Ok(Some(text)) => StepOutcome::Succeeded(text),
            Ok(None) => StepOutcome::Failed(messages::no_output(self.locale).to_string()),
            Err(e) if e.is_blank() => {
                StepOutcome::Failed(messages::unknown_error(self.locale).to_string())
            }
            Err(e) => StepOutcome::Failed(e.to_string()),
        }
    }

    async fn generate(
        &self,
        system_prompt: &str,
        credential: Option<&str>,
        user_text: &str,
        image: Option<&ImageDataUri>,
    ) -> Result<Option<String>, GenerationError> {
        let client = self.factory.client_for(credential)?;
        let request = build_request(system_prompt, user_text, image);
        let output = client.generate(&request).await?;

        Ok(output.filter(|text| !text.trim().is_empty()))
    }

    fn with_fallback(&self, output: Option<String>) -> ChatResult {
        let response_text = output.unwrap_or_else(|| {
            tracing::debug!("generation returned no output, using fallback response");
            messages::fallback_response(self.locale).to_string()
        });
        ChatResult { response_text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::adapters::{MockBehavior, MockClient, StaticClientFactory};

    fn invoker_with(client: MockClient) -> (AgentInvoker, Arc<StaticClientFactory>) {
        let factory = Arc::new(StaticClientFactory::new(Arc::new(client)));
        let invoker = AgentInvoker::new(factory.clone()).with_locale(Locale::English);
        (invoker, factory)
    }

    #[tokio::test]
    async fn test_invoke_returns_generated_text() {
        let client = MockClient::new(MockBehavior::Uppercase);
        let (invoker, _) = invoker_with(client);
        let config = AgentConfig::new("a", "Upper", "Shout");

        let result = invoker.invoke(&config, "hello", None).await.unwrap();
        assert_eq!(result.response_text, "HELLO");
    }

    #[tokio::test]
    async fn test_invoke_masks_empty_output_with_fallback() {
        let (invoker, _) = invoker_with(MockClient::new(MockBehavior::Empty));
        let config = AgentConfig::new("a", "Silent", "Say nothing");

        let result = invoker.invoke(&config, "hello", None).await.unwrap();
        assert_eq!(
            result.response_text,
            messages::fallback_response(Locale::English)
        );
    }

    #[tokio::test]
    async fn test_invoke_propagates_generation_failure() {
        let client = MockClient::new(MockBehavior::Fail("quota exceeded".to_string()));
        let (invoker, _) = invoker_with(client);
        let config = AgentConfig::new("a", "Broken", "Fail");

        let result = invoker.invoke(&config, "hello", None).await;
        assert_eq!(
            result,
            Err(GenerationError::Execution("quota exceeded".to_string()))
        );
    }

    #[tokio::test]
    async fn test_invoke_step_reports_empty_output_as_failure() {
        let (invoker, _) = invoker_with(MockClient::new(MockBehavior::Empty));
        let config = AgentConfig::new("a", "Silent", "Say nothing");

        let outcome = invoker.invoke_step(&config, "hello", None).await;
        assert_eq!(
            outcome,
            StepOutcome::Failed(messages::no_output(Locale::English).to_string())
        );
    }

    #[tokio::test]
    async fn test_invoke_step_reports_generation_failure() {
        let client = MockClient::new(MockBehavior::Fail("boom".to_string()));
        let (invoker, _) = invoker_with(client);
        let config = AgentConfig::new("a", "Broken", "Fail");

        let outcome = invoker.invoke_step(&config, "hello", None).await;
        assert_eq!(outcome, StepOutcome::Failed("Generation failed: boom".to_string()));
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_invoke_step_reports_blank_failure_as_unknown_error() {
        let client = MockClient::new(MockBehavior::Fail(String::new()));
        let (invoker, _) = invoker_with(client);
        let config = AgentConfig::new("a", "Broken", "Fail");

        let outcome = invoker.invoke_step(&config, "hello", None).await;
        assert_eq!(
            outcome,
            StepOutcome::Failed(messages::unknown_error(Locale::English).to_string())
        );
    }

    #[tokio::test]
    async fn test_credential_routes_through_factory() {
        let (invoker, factory) = invoker_with(MockClient::echo());

        let plain = AgentConfig::new("a", "A", "p");
        let keyed = AgentConfig::new("b", "B", "p").with_credential("secret");

        invoker.invoke(&plain, "x", None).await.unwrap();
        invoker.invoke(&keyed, "x", None).await.unwrap();

        assert_eq!(
            factory.requested_credentials(),
            vec![None, Some("secret".to_string())]
        );
    }

    #[tokio::test]
    async fn test_invoke_turn_passes_image_and_rejects_bad_uri() {
        let client = Arc::new(MockClient::echo());
        let factory = Arc::new(StaticClientFactory::new(client.clone()));
        let invoker = AgentInvoker::new(factory);

        let mut turn = ChatTurn {
            user_text: "look".to_string(),
            system_prompt: "Describe".to_string(),
            image_data_uri: Some("data:image/png;base64,aGVsbG8=".to_string()),
            credential: None,
        };

        let result = invoker.invoke_turn(&turn).await.unwrap();
        assert_eq!(result.response_text, "look");
        assert!(client.calls()[0].image.is_some());

        turn.image_data_uri = Some("not-a-uri".to_string());
        let result = invoker.invoke_turn(&turn).await;
        assert!(matches!(result, Err(GenerationError::InvalidRequest(_))));
    }
}
