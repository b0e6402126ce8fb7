//! Agent invocation.
//!
//! This module provides the generation boundary (`GenerationClient`,
//! `ClientFactory`), its Gemini and mock implementations, the prompt
//! template and the `AgentInvoker` that ties them together.

pub mod adapters;
pub mod base;
pub mod factory;
pub mod invoker;
pub mod prompt;

pub use base::{ClientFactory, GenerationClient, GenerationError, GenerationRequest};
pub use factory::{build_client_factory, build_client_factory_with_key, ProviderKind};
pub use invoker::{AgentInvoker, StepOutcome};
pub use prompt::build_request;
