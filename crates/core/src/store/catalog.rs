//! Typed access to the stored agent, pipeline and chat session lists.

use crate::store::error::StoreResult;
use crate::store::{load_json, save_json, KeyValueStore};
use ac_protocol::{Agent, ChatSession, Pipeline};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const AGENTS_KEY: &str = "agentConsoleAgents";
pub const PIPELINES_KEY: &str = "agentConsolePipelines";
pub const SESSIONS_KEY: &str = "agentConsoleChatSessions";

/// Key of one agent's session inside the sessions map.
pub fn session_key(agent_id: &str) -> String {
    format!("chat_{agent_id}")
}

/// A record the catalog can list, look up and update.
trait Record {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    /// Carry over the creation time of the record being replaced.
    fn replace(&mut self, previous: &Self);
}

impl Record for Agent {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn replace(&mut self, previous: &Self) {
        self.created_at = previous.created_at;
        self.updated_at = Utc::now();
    }
}

impl Record for Pipeline {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn replace(&mut self, previous: &Self) {
        self.created_at = previous.created_at;
        self.updated_at = Utc::now();
    }
}

fn find<'a, T: Record>(records: &'a [T], id_or_name: &str) -> Option<&'a T> {
    let needle = id_or_name.trim();
    records
        .iter()
        .find(|record| record.id() == needle)
        .or_else(|| {
            records
                .iter()
                .find(|record| record.name().eq_ignore_ascii_case(needle))
        })
}

fn upsert<T: Record>(records: &mut Vec<T>, mut record: T) -> T
where
    T: Clone,
{
    match records.iter().position(|existing| existing.id() == record.id()) {
        Some(index) => {
            record.replace(&records[index]);
            records[index] = record.clone();
        }
        None => records.push(record.clone()),
    }
    record
}

/// Stored lists over a [`KeyValueStore`].
///
/// Every call reads the current value, so several catalogs over the same
/// store stay consistent.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn KeyValueStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn agents(&self) -> Vec<Agent> {
        load_json(self.store.as_ref(), AGENTS_KEY, Vec::new())
    }

    /// Look an agent up by id, then by name (case-insensitive).
    pub fn find_agent(&self, id_or_name: &str) -> Option<Agent> {
        find(&self.agents(), id_or_name).cloned()
    }

    /// Insert an agent, or replace the one with the same id while keeping
    /// its creation time. Returns the stored record.
    pub fn upsert_agent(&self, agent: Agent) -> StoreResult<Agent> {
        let mut agents = self.agents();
        let stored = upsert(&mut agents, agent);
        save_json(self.store.as_ref(), AGENTS_KEY, &agents)?;
        Ok(stored)
    }

    /// Returns whether an agent was removed.
    pub fn delete_agent(&self, id: &str) -> StoreResult<bool> {
        let mut agents = self.agents();
        let before = agents.len();
        agents.retain(|agent| agent.id != id);
        if agents.len() == before {
            return Ok(false);
        }
        save_json(self.store.as_ref(), AGENTS_KEY, &agents)?;
        Ok(true)
    }

    pub fn pipelines(&self) -> Vec<Pipeline> {
        load_json(self.store.as_ref(), PIPELINES_KEY, Vec::new())
    }

    pub fn find_pipeline(&self, id_or_name: &str) -> Option<Pipeline> {
        find(&self.pipelines(), id_or_name).cloned()
    }

    pub fn upsert_pipeline(&self, pipeline: Pipeline) -> StoreResult<Pipeline> {
        let mut pipelines = self.pipelines();
        let stored = upsert(&mut pipelines, pipeline);
        save_json(self.store.as_ref(), PIPELINES_KEY, &pipelines)?;
        Ok(stored)
    }

    pub fn delete_pipeline(&self, id: &str) -> StoreResult<bool> {
        let mut pipelines = self.pipelines();
        let before = pipelines.len();
        pipelines.retain(|pipeline| pipeline.id != id);
        if pipelines.len() == before {
            return Ok(false);
        }
        save_json(self.store.as_ref(), PIPELINES_KEY, &pipelines)?;
        Ok(true)
    }

    fn sessions(&self) -> BTreeMap<String, ChatSession> {
        load_json(self.store.as_ref(), SESSIONS_KEY, BTreeMap::new())
    }

    /// The stored session for `agent_id`, or a fresh empty one.
    pub fn session(&self, agent_id: &str) -> ChatSession {
        self.sessions()
            .remove(&session_key(agent_id))
            .unwrap_or_else(|| ChatSession::new(agent_id.to_string()))
    }

    pub fn save_session(&self, session: &ChatSession) -> StoreResult<()> {
        let mut sessions = self.sessions();
        sessions.insert(session_key(&session.agent_id), session.clone());
        save_json(self.store.as_ref(), SESSIONS_KEY, &sessions)
    }

    /// Empty the agent's session, keeping the session record.
    pub fn clear_session(&self, agent_id: &str) -> StoreResult<ChatSession> {
        let mut session = self.session(agent_id);
        session.messages.clear();
        session.last_updated = Utc::now();
        self.save_session(&session)?;
        Ok(session)
    }
}
