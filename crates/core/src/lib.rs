//! # ac-core
//!
//! Core engine of agent-console.
//!
//! This crate provides:
//! - The generation client boundary, with a Gemini client and a mock
//! - Single-agent invocation with the fixed prompt template
//! - The comparison orchestrator (concurrent fan-out)
//! - The pipeline engine (sequential, fail-fast)
//! - Chat with per-agent history
//! - Persistence of agents, pipelines and chat sessions
//! - Configuration loading from the `.agent-console/` directory
//!
//! ## Modules
//!
//! - [`agents`]: Generation clients and the `AgentInvoker`
//! - [`compare`]: Comparison orchestrator
//! - [`engine`]: Pipeline execution engine
//! - [`chat`]: Chat service
//! - [`store`]: Key-value store and the typed `Catalog`
//! - [`config`]: Configuration loading
//! - [`init`]: Scaffolding of a new `.agent-console/` directory
//! - [`media`]: Image data URIs
//! - [`messages`]: Localized user-facing messages

pub mod agents;
pub mod chat;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod init;
pub mod media;
pub mod messages;
pub mod store;

pub use agents::{AgentInvoker, StepOutcome};
pub use chat::{ChatError, ChatService};
pub use compare::ComparisonOrchestrator;
pub use engine::PipelineEngine;
pub use error::OrchestrationError;
pub use media::{ImageDataUri, MediaError};
