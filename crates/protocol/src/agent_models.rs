//! Agent models.
//!
//! An [`Agent`] is the stored record a user creates and edits. An
//! [`AgentConfig`] is the resolved, immutable view of that record handed to
//! the orchestrators for one invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named system-prompt configuration as stored by the console.
///
/// # Example
///
/// ```json
/// {
///   "id": "translator",
///   "name": "Translator",
///   "description": "Translates Arabic to English",
///   "systemPrompt": "You translate everything into English.",
///   "avatarUrl": "https://placehold.co/100x100.png",
///   "createdAt": "2024-05-01T10:00:00Z",
///   "updatedAt": "2024-05-01T10:00:00Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier, referenced by pipelines and chat sessions.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description of the agent's job.
    #[serde(default)]
    pub description: String,

    /// System prompt defining the agent's behavior.
    pub system_prompt: String,

    /// Optional per-agent credential for the generation provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Optional avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,

    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent with both timestamps set to now.
    pub fn new(id: String, name: String, system_prompt: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: String::new(),
            system_prompt,
            api_key: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Set the per-agent credential. Empty strings are stored as `None`.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    /// Set the avatar URL. Empty strings are stored as `None`.
    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url.filter(|url| !url.is_empty());
        self
    }
}

/// The configuration of one agent as seen by a single invocation.
///
/// Owned by the caller and passed by value into the orchestrators; never
/// mutated while a call is in flight.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub id: String,
    pub name: String,
    pub system_prompt: String,

    /// When present and non-empty, the call is routed through a client
    /// scoped to this credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

impl AgentConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            system_prompt: system_prompt.into(),
            credential: None,
            avatar_ref: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn with_avatar_ref(mut self, avatar_ref: impl Into<String>) -> Self {
        self.avatar_ref = Some(avatar_ref.into());
        self
    }
}

impl From<&Agent> for AgentConfig {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.name.clone(),
            system_prompt: agent.system_prompt.clone(),
            credential: agent.api_key.clone().filter(|key| !key.is_empty()),
            avatar_ref: agent.avatar_url.clone(),
        }
    }
}
