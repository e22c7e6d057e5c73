//! Dialogue engine trait.
//!
//! The seam behind which the LLM backend sits. The roleplay service calls
//! through this trait for scenario synthesis, turn generation, and
//! transcript evaluation; the concrete engine (and its transport) belongs
//! to the surrounding system.

use super::model::TranscriptTurn;
use super::scenario::Scenario;
use crate::error::Result;
use async_trait::async_trait;

/// Generates simulated-counterpart behavior.
///
/// The engine is stateless between calls: everything it needs for a turn
/// (behavior definition, transcript so far, new message) is supplied by
/// the caller every time.
#[async_trait]
pub trait DialogueEngine: Send + Sync {
    /// Synthesizes a complete scenario from a free-text description.
    ///
    /// Used for ad hoc contexts; the returned scenario is handed to the
    /// caller and never registered in the catalog.
    async fn synthesize_scenario(&self, description: &str) -> Result<Scenario>;

    /// Produces the counterpart's reply to `message`, staying in character
    /// per `behavior_definition` and the transcript so far.
    async fn reply(
        &self,
        behavior_definition: &str,
        transcript: &[TranscriptTurn],
        message: &str,
    ) -> Result<String>;

    /// Produces a free-form assessment of the transcript against the
    /// scenario's goal and tone. Does not mutate any state.
    async fn evaluate(
        &self,
        behavior_definition: &str,
        transcript: &[TranscriptTurn],
    ) -> Result<String>;
}
