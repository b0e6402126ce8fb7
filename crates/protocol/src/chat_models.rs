//! Chat models for single-agent conversations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// One request to a single agent.
///
/// Constructed fresh per call; it has no identity beyond the call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub user_text: String,
    pub system_prompt: String,

    /// Image as a `data:<mimetype>;base64,<data>` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

/// The reply to a [`ChatTurn`]. Always populated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ChatResult {
    pub response_text: String,
}

/// Who authored a [`Message`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
    System,
}

/// One entry of a chat transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[ts(type = "string")]
    pub id: Uuid,

    pub role: MessageRole,

    pub content: String,

    /// Image attached by the user, as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,

    /// Agent that produced or received this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl Message {
    /// A message typed by the user.
    pub fn user(content: String, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: MessageRole::User,
            content,
            image_url,
            timestamp: Utc::now(),
            agent_id: None,
        }
    }

    /// A reply produced by an agent.
    pub fn agent(agent_id: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: MessageRole::Agent,
            content,
            image_url: None,
            timestamp: Utc::now(),
            agent_id: Some(agent_id),
        }
    }
}

/// The stored transcript of a conversation with one agent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub agent_id: String,
    pub messages: Vec<Message>,

    #[ts(type = "string")]
    pub last_updated: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(agent_id: String) -> Self {
        Self {
            agent_id,
            messages: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}
