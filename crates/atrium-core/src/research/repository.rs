//! Research session repository trait.
//!
//! Defines the interface for research session persistence operations.

use super::model::ResearchSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing research session persistence.
///
/// This trait defines the contract for persisting and retrieving sessions,
/// decoupling the orchestrator from the specific storage mechanism
/// (e.g., TOML files, database, remote API).
///
/// Sessions are retained indefinitely: a terminal session remains
/// revisitable by identifier so that clients can resume observation
/// after navigation or reload.
#[async_trait]
pub trait ResearchSessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ResearchSession))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ResearchSession>>;

    /// Saves a session to storage, replacing any previous version.
    async fn save(&self, session: &ResearchSession) -> Result<()>;

    /// Deletes a session from storage. Deleting a missing session is not
    /// an error.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all sessions belonging to `owner_id`, ordered by `created_at`
    /// descending (most recent first).
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ResearchSession>>;
}
