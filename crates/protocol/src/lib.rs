//! # ac-protocol
//!
//! Shared data model for agent-console.
//!
//! This crate defines every structure that crosses a layer boundary:
//! - Stored records (agents, pipelines, chat sessions)
//! - Orchestrator inputs and reports (comparison, pipeline execution)
//! - Progress events emitted while a pipeline or comparison runs
//! - Global configuration from `config.toml`
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent records and per-invocation agent configuration
//! - [`chat_models`]: Chat turns, messages and sessions
//! - [`comparison_models`]: Per-agent comparison results
//! - [`config_models`]: Global configuration from config.toml
//! - [`pipeline_models`]: Pipeline definitions and execution reports
//! - [`ipc`]: Progress events sent from the core to the caller
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` so a browser front end
//!   can consume the same shapes
//! - camelCase JSON field names, matching the stored browser records

pub mod agent_models;
pub mod chat_models;
pub mod comparison_models;
pub mod config_models;
pub mod ipc;
pub mod pipeline_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use chat_models::*;
pub use comparison_models::*;
pub use config_models::*;
pub use ipc::*;
pub use pipeline_models::*;
