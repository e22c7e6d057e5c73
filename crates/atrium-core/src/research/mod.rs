//! Research domain module.
//!
//! Contains the research session entity, its status state machine, the
//! repository trait, and the collaborator traits consumed by the
//! orchestrator (asset catalog, processing worker).

pub mod gateway;
pub mod model;
pub mod repository;

pub use gateway::{AssetCatalog, CatalogEntry, ProcessingJob, ProcessingWorker};
pub use model::{
    AssetKind, AssetOutcome, AssetStatus, ResearchAsset, ResearchSession, SessionStatus,
};
pub use repository::ResearchSessionRepository;
