//! Research session domain model.
//!
//! This module contains the core entities for one deep-research ingestion
//! job: the session record, its asset list, and the status state machines
//! for both. All transitions are forward-only; nothing ever reverts.

use crate::error::{AtriumError, Result};
use serde::{Deserialize, Serialize};

/// Represents the overall status of a research session.
///
/// Sessions progress `Proposed -> Executing -> {Completed, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Scope has been computed but processing has not started.
    Proposed,
    /// Assets have been dispatched to the processing worker.
    Executing,
    /// Every asset reached a terminal status.
    Completed,
    /// An orchestration-level fault occurred (e.g. no dispatch possible).
    Failed,
}

impl SessionStatus {
    /// A terminal status admits no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether moving to `next` is a legal forward transition.
    pub fn can_advance_to(&self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Proposed, SessionStatus::Executing)
                | (Self::Proposed, SessionStatus::Failed)
                | (Self::Executing, SessionStatus::Completed)
                | (Self::Executing, SessionStatus::Failed)
        )
    }
}

/// Represents the processing status of a single asset.
///
/// An asset starts `Pending` and transitions to exactly one terminal
/// value once the processing worker reports an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Waiting for a worker outcome.
    Pending,
    /// Transcribed/extracted and indexed successfully.
    Indexed,
    /// Processing failed; tolerated at the session level.
    Error,
}

impl AssetStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Indexed | Self::Error)
    }
}

/// The kind of remote content behind an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Document,
    Audio,
    Video,
}

/// A per-asset outcome reported by the processing worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetOutcome {
    Indexed,
    Error,
}

impl AssetOutcome {
    fn as_status(&self) -> AssetStatus {
        match self {
            Self::Indexed => AssetStatus::Indexed,
            Self::Error => AssetStatus::Error,
        }
    }
}

/// One unit of remote content subject to processing within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchAsset {
    /// Identifier assigned by the asset catalog.
    pub asset_id: String,
    /// Human-readable asset name.
    pub name: String,
    /// Content kind (document, audio, video).
    pub kind: AssetKind,
    /// Processing status; `Pending` until the worker reports.
    pub status: AssetStatus,
    /// Attachment URL retained for the worker, when the catalog provides one.
    #[serde(default)]
    pub source_url: Option<String>,
}

impl ResearchAsset {
    /// Creates a pending asset from catalog data.
    pub fn pending(
        asset_id: impl Into<String>,
        name: impl Into<String>,
        kind: AssetKind,
        source_url: Option<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            name: name.into(),
            kind,
            status: AssetStatus::Pending,
            source_url,
        }
    }

    /// Applies a worker outcome. Returns `true` if the status changed.
    ///
    /// Terminal statuses are sticky: once `Indexed` or `Error`, any further
    /// outcome delivery is ignored, which makes outcome handling idempotent
    /// per asset.
    pub fn apply_outcome(&mut self, outcome: AssetOutcome) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = outcome.as_status();
        true
    }
}

/// A durable record of one deep-research ingestion job.
///
/// The session owns the authoritative state for the job: the scoping query,
/// the proposed asset set, per-asset status, and the overall status. The
/// identifying fields (`id`, `owner_id`, `query`, `summary`, `created_at`)
/// are immutable after creation; only the orchestrator mutates `assets` and
/// `status` in response to worker outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchSession {
    /// Unique session identifier (UUID format), minted at proposal time.
    pub id: String,
    /// Identifier of the requesting user.
    pub owner_id: String,
    /// Free-text query that scoped the proposal.
    pub query: String,
    /// Human-readable description of the scope, produced at proposal time.
    pub summary: String,
    /// Ordered asset set; entries are all `Pending` at proposal time.
    pub assets: Vec<ResearchAsset>,
    /// Overall session status; forward-only transitions.
    pub status: SessionStatus,
    /// Timestamp when the session was created (RFC 3339 format).
    pub created_at: String,
    /// Timestamp of the last asset-status change (RFC 3339 format).
    pub updated_at: String,
}

impl ResearchSession {
    /// Creates a new `Proposed` session with a fresh UUID and timestamps.
    pub fn propose(
        owner_id: impl Into<String>,
        query: impl Into<String>,
        summary: impl Into<String>,
        assets: Vec<ResearchAsset>,
    ) -> Self {
        let now = now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            query: query.into(),
            summary: summary.into(),
            assets,
            status: SessionStatus::Proposed,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Advances the session status, enforcing forward-only transitions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the transition would move backward or
    /// leave a terminal status.
    pub fn advance_to(&mut self, next: SessionStatus) -> Result<()> {
        if !self.status.can_advance_to(next) {
            return Err(AtriumError::invalid_state(format!(
                "session {} cannot move from {:?} to {:?}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    /// Records a worker outcome for one asset.
    ///
    /// Returns `true` if the asset's status changed (duplicate deliveries
    /// return `false` and leave the session untouched).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the asset is not part of this session.
    pub fn record_outcome(&mut self, asset_id: &str, outcome: AssetOutcome) -> Result<bool> {
        let asset = self
            .assets
            .iter_mut()
            .find(|a| a.asset_id == asset_id)
            .ok_or_else(|| AtriumError::not_found("research_asset", asset_id))?;

        let changed = asset.apply_outcome(outcome);
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    /// The completion invariant: at least one asset exists and every asset
    /// has reached a terminal status. Individual asset errors do not block
    /// completion.
    pub fn completion_ready(&self) -> bool {
        !self.assets.is_empty() && self.assets.iter().all(|a| a.status.is_terminal())
    }

    /// Number of assets that have reached a terminal status.
    pub fn terminal_asset_count(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| a.status.is_terminal())
            .count()
    }

    fn touch(&mut self) {
        self.updated_at = now_rfc3339();
    }
}

/// Returns the current UTC time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
