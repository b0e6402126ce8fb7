//! Chat with a single agent, with per-agent history.

use crate::agents::{AgentInvoker, GenerationError};
use crate::media::ImageDataUri;
use crate::store::{Catalog, StoreError};
use ac_protocol::{Agent, AgentConfig, ChatSession, Message};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Failed to save chat history: {0}")]
    Store(#[from] StoreError),
}

pub struct ChatService {
    invoker: Arc<AgentInvoker>,
    catalog: Catalog,
}

impl ChatService {
    pub fn new(invoker: Arc<AgentInvoker>, catalog: Catalog) -> Self {
        Self { invoker, catalog }
    }

    /// Send one message to `agent` and record the exchange.
    ///
    /// Each turn is independent: earlier messages are kept for display but
    /// are not sent to the agent. An empty agent output is replaced by the
    /// fallback message. If the call fails, the user's message is still
    /// saved and the error is returned.
    pub async fn send(
        &self,
        agent: &Agent,
        text: &str,
        image: Option<&ImageDataUri>,
    ) -> Result<Message, ChatError> {
        let mut session = self.catalog.session(&agent.id);
        session.messages.push(Message::user(
            text.to_string(),
            image.map(ToString::to_string),
        ));

        let config = AgentConfig::from(agent);
        let result = match self.invoker.invoke(&config, text, image).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(agent = %agent.name, error = %e, "chat turn failed");
                self.save(&mut session)?;
                return Err(e.into());
            }
        };

        let reply = Message::agent(agent.id.clone(), result.response_text);
        session.messages.push(reply.clone());
        self.save(&mut session)?;

        Ok(reply)
    }

    pub fn history(&self, agent_id: &str) -> ChatSession {
        self.catalog.session(agent_id)
    }

    /// Drop every message of the agent's session, keeping the session.
    pub fn clear(&self, agent_id: &str) -> Result<(), ChatError> {
        self.catalog.clear_session(agent_id)?;
        Ok(())
    }

    fn save(&self, session: &mut ChatSession) -> Result<(), ChatError> {
        session.last_updated = Utc::now();
        self.catalog.save_session(session)?;
        Ok(())
    }
}
