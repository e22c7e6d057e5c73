//! Research orchestration use case.
//!
//! This module provides the `ResearchOrchestrator`, the state machine that
//! moves a research session through propose -> execute -> observe ->
//! complete/fail. It coordinates the asset catalog (scope discovery), the
//! processing worker (out-of-process transcription/indexing), and the
//! session repository (the authoritative store).

use atrium_core::error::{AtriumError, Result};
use atrium_core::research::{
    AssetCatalog, AssetOutcome, CatalogEntry, ProcessingJob, ProcessingWorker, ResearchAsset,
    ResearchSession, ResearchSessionRepository, SessionStatus,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Orchestrates deep-research ingestion sessions.
///
/// # Responsibilities
///
/// - Building a scoped proposal from a free-text query
/// - Dispatching assets to the processing worker on confirmation
/// - Reconciling per-asset outcomes into the session record
/// - Serving read-only status snapshots and per-owner history
///
/// # Concurrency
///
/// All mutation of a given session is serialized through a per-session
/// lock, so concurrently arriving worker outcomes cannot race the
/// completion check. Different sessions proceed fully independently.
/// `get_status` and `list_history` are side-effect-free and need no lock.
pub struct ResearchOrchestrator {
    /// Authoritative store for session records
    repository: Arc<dyn ResearchSessionRepository>,
    /// Remote asset discovery
    catalog: Arc<dyn AssetCatalog>,
    /// Out-of-process transcription/indexing pipeline
    worker: Arc<dyn ProcessingWorker>,
    /// Per-session mutation locks, created lazily
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ResearchOrchestrator {
    /// Creates a new `ResearchOrchestrator`.
    pub fn new(
        repository: Arc<dyn ResearchSessionRepository>,
        catalog: Arc<dyn AssetCatalog>,
        worker: Arc<dyn ProcessingWorker>,
    ) -> Self {
        Self {
            repository,
            catalog,
            worker,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Builds and persists a scoped proposal for `query`.
    ///
    /// Calls the asset catalog, retrying once with an OR-joined keyword
    /// query when the full query matches nothing. An empty result set is
    /// non-fatal: the returned session has zero assets and a summary
    /// saying no matches were found, and the caller decides whether that
    /// proposal is actionable.
    ///
    /// # Errors
    ///
    /// - `InvalidState`: `query` is empty after trimming
    /// - `Upstream`: the catalog cannot be reached
    pub async fn propose(&self, query: &str, owner_id: &str) -> Result<ResearchSession> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Err(AtriumError::invalid_state(
                "research query must not be empty",
            ));
        }

        tracing::info!(target: "research", owner_id, query, "building research proposal");

        let mut entries = self.catalog.search(&query).await?;

        // The full phrase matched nothing; retry with significant keywords
        // joined by OR before declaring an empty proposal.
        if entries.is_empty() {
            if let Some(keyword_query) = keyword_fallback(&query) {
                tracing::debug!(
                    target: "research",
                    keyword_query,
                    "full query matched nothing, retrying with keywords"
                );
                entries = self.catalog.search(&keyword_query).await?;
            }
        }

        let assets: Vec<ResearchAsset> = entries.into_iter().map(asset_from_entry).collect();

        let summary = if assets.is_empty() {
            format!("No matching assets were found for '{}'.", query)
        } else {
            format!("Found {} assets related to '{}'.", assets.len(), query)
        };

        let session = ResearchSession::propose(owner_id, query, summary, assets);
        self.repository.save(&session).await?;

        tracing::info!(
            target: "research",
            session_id = %session.id,
            asset_count = session.assets.len(),
            "proposal persisted"
        );

        Ok(session)
    }

    /// Confirms a proposal and dispatches its assets to the worker.
    ///
    /// The session transitions to `Executing` and every asset is handed to
    /// the processing worker; the handoff is fire-and-forget per asset and
    /// this call never waits for processing to finish. Re-invocation on an
    /// already-executing or terminal session is an idempotent no-op, so
    /// duplicate client requests never double-dispatch.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `Forbidden`: unknown session or ownership mismatch
    /// - `InvalidState`: malformed session id, or a proposal with no assets
    /// - `Upstream`: the worker rejected every single dispatch; the session
    ///   is marked `Failed` (orchestration-level fault)
    pub async fn execute(&self, session_id: &str, owner_id: &str) -> Result<()> {
        if session_id.trim().is_empty() {
            return Err(AtriumError::invalid_state("session id must not be empty"));
        }

        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self.load_owned(session_id, owner_id).await?;

        if session.status != SessionStatus::Proposed {
            // Duplicate client request; success without re-dispatch.
            tracing::debug!(
                target: "research",
                session_id,
                status = ?session.status,
                "execute on non-proposed session is a no-op"
            );
            if session.status.is_terminal() {
                self.release_session_lock(session_id).await;
            }
            return Ok(());
        }

        if session.assets.is_empty() {
            return Err(AtriumError::invalid_state(format!(
                "session {} has no assets to execute",
                session_id
            )));
        }

        session.advance_to(SessionStatus::Executing)?;
        self.repository.save(&session).await?;

        let jobs: Vec<ProcessingJob> = session
            .assets
            .iter()
            .map(|asset| ProcessingJob {
                session_id: session.id.clone(),
                asset_id: asset.asset_id.clone(),
                kind: asset.kind,
                source_url: asset.source_url.clone(),
            })
            .collect();

        let mut dispatched = 0usize;
        let mut rejected: Vec<String> = Vec::new();

        for job in jobs {
            let asset_id = job.asset_id.clone();
            match self.worker.submit(job).await {
                Ok(()) => dispatched += 1,
                Err(e) => {
                    tracing::warn!(
                        target: "research",
                        session_id,
                        asset_id,
                        "worker rejected dispatch: {}",
                        e
                    );
                    rejected.push(asset_id);
                }
            }
        }

        if dispatched == 0 {
            // Not a single asset could be handed off; this is an
            // orchestration-level fault, not an asset-level one.
            session.advance_to(SessionStatus::Failed)?;
            self.repository.save(&session).await?;
            self.release_session_lock(session_id).await;
            return Err(AtriumError::upstream(format!(
                "processing worker rejected every dispatch for session {}",
                session_id
            )));
        }

        // Assets that could not be handed off get a terminal error through
        // the normal outcome path; the session still completes once the
        // dispatched ones report back.
        if !rejected.is_empty() {
            for asset_id in &rejected {
                session.record_outcome(asset_id, AssetOutcome::Error)?;
            }
            self.repository.save(&session).await?;
        }

        tracing::info!(
            target: "research",
            session_id,
            dispatched,
            rejected = rejected.len(),
            "session executing"
        );

        Ok(())
    }

    /// Records one worker outcome and re-evaluates the completion invariant.
    ///
    /// Invoked by the processing worker collaborator. Idempotent per
    /// `(session, asset)`: duplicate deliveries leave the session exactly
    /// as a single delivery would. This is the only path by which a
    /// session reaches `Completed`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: unknown session or unknown asset within the session
    pub async fn on_asset_outcome(
        &self,
        session_id: &str,
        asset_id: &str,
        outcome: AssetOutcome,
    ) -> Result<()> {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self
            .repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AtriumError::not_found("research_session", session_id))?;

        let changed = session.record_outcome(asset_id, outcome)?;
        if changed {
            if session.status == SessionStatus::Executing && session.completion_ready() {
                session.advance_to(SessionStatus::Completed)?;
                tracing::info!(
                    target: "research",
                    session_id,
                    asset_count = session.assets.len(),
                    "all assets terminal, session completed"
                );
            }
            self.repository.save(&session).await?;
        } else {
            tracing::debug!(
                target: "research",
                session_id,
                asset_id,
                "duplicate outcome delivery ignored"
            );
        }

        if session.status.is_terminal() {
            self.release_session_lock(session_id).await;
        }
        Ok(())
    }

    /// Returns a read-only snapshot of the session.
    ///
    /// Side-effect-free and idempotent, so concurrent pollers for the same
    /// session are safe.
    ///
    /// # Errors
    ///
    /// - `NotFound`: the session does not exist
    /// - `Forbidden`: the session belongs to another owner
    pub async fn get_status(&self, session_id: &str, owner_id: &str) -> Result<ResearchSession> {
        self.load_owned(session_id, owner_id).await
    }

    /// Lists all sessions for `owner_id`, most recent first.
    pub async fn list_history(&self, owner_id: &str) -> Result<Vec<ResearchSession>> {
        self.repository.list_for_owner(owner_id).await
    }

    async fn load_owned(&self, session_id: &str, owner_id: &str) -> Result<ResearchSession> {
        let session = self
            .repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AtriumError::not_found("research_session", session_id))?;

        if session.owner_id != owner_id {
            return Err(AtriumError::forbidden("research_session", session_id));
        }

        Ok(session)
    }

    /// Returns the mutation lock for a session, creating it on first use.
    async fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the registry entry once a session is observed terminal, so the
    /// registry stays bounded by the number of live sessions. Callers still
    /// holding a clone of the lock are unaffected, and a terminal session
    /// admits no further mutation for a re-minted lock to race.
    async fn release_session_lock(&self, session_id: &str) {
        let mut locks = self.session_locks.lock().await;
        locks.remove(session_id);
    }
}

/// Trims and collapses internal whitespace.
fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds an OR-joined retry query from the significant words of `query`.
///
/// Returns `None` when the query has no word long enough to be worth
/// retrying, or when the fallback would just repeat the original query.
fn keyword_fallback(query: &str) -> Option<String> {
    let words: Vec<&str> = query.split_whitespace().filter(|w| w.len() > 3).collect();
    if words.is_empty() {
        return None;
    }
    let fallback = words.join(" OR ");
    if fallback == query {
        return None;
    }
    Some(fallback)
}

fn asset_from_entry(entry: CatalogEntry) -> ResearchAsset {
    ResearchAsset::pending(entry.asset_id, entry.name, entry.kind, entry.source_url)
}
