//! Generation client boundary and supporting types.

use crate::media::ImageDataUri;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// One fully composed request to a generation provider.
///
/// Built by [`crate::agents::prompt::build_request`]; clients treat it as
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The agent's system prompt.
    pub system_prompt: String,

    /// The raw user text, before templating.
    pub user_text: String,

    /// The rendered prompt sent to the provider.
    pub prompt: String,

    /// Optional image attached to the turn.
    pub image: Option<ImageDataUri>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No API key configured for the generation provider")]
    MissingCredential,
    #[error("Unknown generation provider: {0}")]
    UnknownProvider(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("API call failed ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Generation failed: {0}")]
    Execution(String),
}

impl GenerationError {
    /// Whether the error carries no message of its own.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::UnknownProvider(message)
            | Self::InvalidRequest(message)
            | Self::Http(message)
            | Self::InvalidResponse(message)
            | Self::Execution(message) => message.trim().is_empty(),
            Self::MissingCredential | Self::Api { .. } => false,
        }
    }
}

/// A single-call text generator.
///
/// `Ok(None)` means the provider answered without usable text. How that is
/// surfaced is up to the caller.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<Option<String>, GenerationError>;
}

/// Resolves the client used for one invocation.
///
/// A non-empty credential yields a client scoped to that credential;
/// `None` (or an empty string) yields the shared default client.
pub trait ClientFactory: Send + Sync {
    fn client_for(
        &self,
        credential: Option<&str>,
    ) -> Result<Arc<dyn GenerationClient>, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestClient {
        available: bool,
    }

    #[async_trait]
    impl GenerationClient for TestClient {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<Option<String>, GenerationError> {
            if !self.available {
                return Err(GenerationError::Http("connection refused".to_string()));
            }
            Ok(Some(format!("Processed: {}", request.user_text)))
        }
    }

    fn request(user_text: &str) -> GenerationRequest {
        GenerationRequest {
            system_prompt: "Test prompt".to_string(),
            user_text: user_text.to_string(),
            prompt: format!("Test prompt\n\nUser: {user_text}\nAgent:"),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_client_generate_success() {
        let client = TestClient { available: true };
        let output = client.generate(&request("hello")).await.unwrap();
        assert_eq!(output.as_deref(), Some("Processed: hello"));
    }

    #[tokio::test]
    async fn test_client_generate_failure() {
        let client = TestClient { available: false };
        let result = client.generate(&request("hello")).await;
        assert!(matches!(result, Err(GenerationError::Http(_))));
    }

    #[test]
    fn test_generation_error_display() {
        let error = GenerationError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(error.to_string(), "API call failed (429): quota exceeded");
        assert_eq!(
            GenerationError::Execution("boom".to_string()).to_string(),
            "Generation failed: boom"
        );
    }

    #[test]
    fn test_blank_errors() {
        assert!(GenerationError::Execution(String::new()).is_blank());
        assert!(GenerationError::Http("  ".to_string()).is_blank());
        assert!(!GenerationError::Execution("boom".to_string()).is_blank());
        assert!(!GenerationError::MissingCredential.is_blank());
        assert!(!GenerationError::Api {
            status: 500,
            message: String::new(),
        }
        .is_blank());
    }
}
