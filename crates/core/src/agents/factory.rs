//! Client factory selection from the global configuration.

use crate::agents::adapters::{GeminiClientFactory, MockBehavior, MockClient, StaticClientFactory};
use crate::agents::base::{ClientFactory, GenerationError};
use ac_protocol::GlobalConfig;
use std::sync::Arc;

/// Generation providers the console can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl ProviderKind {
    /// Parse a provider name from `config.toml`, ignoring case.
    ///
    /// ```
    /// use ac_core::agents::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::from_name("Gemini"), Some(ProviderKind::Gemini));
    /// assert_eq!(ProviderKind::from_name("mock"), Some(ProviderKind::Mock));
    /// assert_eq!(ProviderKind::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "mock" => Some(Self::Mock),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }
}

/// Build the factory for the configured provider, reading the default
/// API key from the environment variable named in `api_key_env`.
pub fn build_client_factory(
    config: &GlobalConfig,
) -> Result<Arc<dyn ClientFactory>, GenerationError> {
    let default_key = std::env::var(&config.api_key_env).ok();
    build_client_factory_with_key(config, default_key)
}

/// Same as [`build_client_factory`] with an explicit default key.
///
/// A missing key is not an error here: agents with their own credential
/// still work, the others fail per call with
/// [`GenerationError::MissingCredential`].
pub fn build_client_factory_with_key(
    config: &GlobalConfig,
    default_key: Option<String>,
) -> Result<Arc<dyn ClientFactory>, GenerationError> {
    let kind = ProviderKind::from_name(&config.provider)
        .ok_or_else(|| GenerationError::UnknownProvider(config.provider.clone()))?;

    match kind {
        ProviderKind::Gemini => {
            if default_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
                tracing::warn!(
                    env = %config.api_key_env,
                    "no default API key set; only agents with their own key can run"
                );
            }
            Ok(Arc::new(GeminiClientFactory::new(config.model.clone(), default_key)))
        }
        ProviderKind::Mock => Ok(Arc::new(StaticClientFactory::new(Arc::new(
            MockClient::new(MockBehavior::Echo),
        )))),
    }
}
