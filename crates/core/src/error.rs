//! Errors returned by the comparison and pipeline orchestrators.
//!
//! Per-agent failures never show up here: they are recorded inside the
//! returned reports. Only problems detected before any invocation are
//! errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationError {
    #[error("{0}")]
    Validation(String),
    #[error("Unknown agent: {agent_id}")]
    UnknownAgent { agent_id: String },
}
