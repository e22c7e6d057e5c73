//! Roleplay/simulation domain module.
//!
//! Contains the roleplay context entity, the transcript types, the
//! client-visible simulation phase machine, the scenario catalog trait,
//! and the dialogue engine trait behind which the LLM backend sits.

pub mod engine;
pub mod model;
pub mod scenario;

pub use engine::DialogueEngine;
pub use model::{
    CUSTOM_CONTEXT_PREFIX, RoleplayContext, SimulationPhase, TranscriptTurn, TurnRole,
    is_custom_context_id,
};
pub use scenario::{Scenario, ScenarioCatalog, ScenarioSummary};
