//! In-memory ResearchSessionRepository implementation.
//!
//! Used by tests and by embedders that do not need durable storage.

use async_trait::async_trait;
use atrium_core::error::Result;
use atrium_core::research::{ResearchSession, ResearchSessionRepository};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A `HashMap`-backed repository with the same contract as the TOML store.
#[derive(Default)]
pub struct MemoryResearchSessionRepository {
    sessions: RwLock<HashMap<String, ResearchSession>>,
}

impl MemoryResearchSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResearchSessionRepository for MemoryResearchSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ResearchSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn save(&self, session: &ResearchSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ResearchSession>> {
        let sessions = self.sessions.read().await;
        let mut owned: Vec<ResearchSession> = sessions
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
