//! Application layer: use-case services over the atrium domain.
//!
//! - [`research_usecase`]: the deep-research orchestrator (propose,
//!   execute, outcome reconciliation, history).
//! - [`poller`]: the shared cancellable status-polling primitive.
//! - [`roleplay_usecase`]: the roleplay context manager.
//! - [`dashboard`]: static per-role dashboard configuration.

pub mod dashboard;
pub mod poller;
pub mod research_usecase;
pub mod roleplay_usecase;

pub use poller::{PollEvent, PollHandle, StatusPoller};
pub use research_usecase::ResearchOrchestrator;
pub use roleplay_usecase::RoleplayService;
