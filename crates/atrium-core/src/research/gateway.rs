//! Collaborator traits consumed by the research orchestrator.
//!
//! Both collaborators run outside the orchestrator's own call path: the
//! asset catalog is a remote query service, and the processing worker is
//! an out-of-process transcription/indexing pipeline. The orchestrator
//! consumes them at this boundary and never implements them.

use super::model::AssetKind;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One search hit from the asset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog-assigned asset identifier.
    pub asset_id: String,
    /// Human-readable asset name.
    pub name: String,
    /// Content kind, derived by the catalog from attachment metadata.
    pub kind: AssetKind,
    /// Attachment URL for media assets, when available.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Queries and fetches metadata for remote content assets by topic.
///
/// # Errors
///
/// Implementations surface `Upstream` when the catalog cannot be reached;
/// an empty result set is a normal, non-error outcome.
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    /// Searches the catalog for assets matching a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>>;
}

/// A unit of work handed to the processing worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingJob {
    /// The session the asset belongs to, echoed back with the outcome.
    pub session_id: String,
    /// The asset to transcribe/extract and index.
    pub asset_id: String,
    /// Content kind, used by the worker to pick a processing path.
    pub kind: AssetKind,
    /// Attachment URL for media download, when the catalog provided one.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Performs per-asset transcription/extraction and indexing.
///
/// `submit` is a fire-and-forget handoff: a successful return means the
/// job was accepted, not that processing finished. The outcome arrives
/// later through the orchestrator's `on_asset_outcome` path; the delivery
/// mechanism (callback, webhook, queue) belongs to the surrounding system.
#[async_trait]
pub trait ProcessingWorker: Send + Sync {
    /// Hands one asset to the worker for asynchronous processing.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the worker cannot accept the job at all.
    async fn submit(&self, job: ProcessingJob) -> Result<()>;
}
