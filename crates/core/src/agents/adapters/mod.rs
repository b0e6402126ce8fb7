//! Generation client implementations.

mod gemini_adapter;
pub mod mock_client;

pub use gemini_adapter::{GeminiClient, GeminiClientFactory, DEFAULT_BASE_URL};
pub use mock_client::{MockBehavior, MockClient, StaticClientFactory};
