//! Roleplay context use case.
//!
//! The `RoleplayService` hands out conversation contexts for leadership
//! training simulations. A context comes either from the preset scenario
//! catalog or from a free-text description synthesized into an ad-hoc
//! persona. Contexts are ephemeral: the service holds no per-session
//! state, and the caller carries the full context (behavior definition
//! included) through every subsequent call.

use atrium_core::error::{AtriumError, Result};
use atrium_core::roleplay::{
    CUSTOM_CONTEXT_PREFIX, DialogueEngine, RoleplayContext, Scenario, ScenarioCatalog,
    ScenarioSummary, TranscriptTurn,
};
use std::sync::Arc;

/// Manages roleplay contexts and drives simulated conversations.
pub struct RoleplayService {
    catalog: Arc<dyn ScenarioCatalog>,
    engine: Arc<dyn DialogueEngine>,
}

impl RoleplayService {
    pub fn new(catalog: Arc<dyn ScenarioCatalog>, engine: Arc<dyn DialogueEngine>) -> Self {
        Self { catalog, engine }
    }

    /// Lists the preset scenarios available for selection.
    ///
    /// Custom contexts never appear here; they exist only in the hands of
    /// the caller that created them.
    pub fn list_scenarios(&self) -> Vec<ScenarioSummary> {
        self.catalog.list()
    }

    /// Builds a context from a preset catalog scenario.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no preset with this id (including `custom-*` ids,
    ///   which are outside the catalog namespace by construction)
    pub fn create_from_catalog(&self, scenario_id: &str, owner_id: &str) -> Result<RoleplayContext> {
        let scenario = self
            .catalog
            .get(scenario_id)
            .ok_or_else(|| AtriumError::not_found("scenario", scenario_id))?;

        let context_id = scenario.id.clone();
        Ok(context_from_scenario(scenario, context_id, owner_id))
    }

    /// Synthesizes an ad-hoc context from a free-text description.
    ///
    /// The returned context carries everything needed for later turns;
    /// it is never registered anywhere, so losing it means recreating it.
    ///
    /// # Errors
    ///
    /// - `InvalidState`: the description is empty after trimming
    /// - `Upstream`: the dialogue engine is unavailable
    /// - `Internal`: the engine returned an unusable persona
    pub async fn create_custom(&self, description: &str, owner_id: &str) -> Result<RoleplayContext> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AtriumError::invalid_state(
                "custom scenario description must not be empty",
            ));
        }

        tracing::info!(target: "roleplay", owner_id, "synthesizing custom scenario");
        let scenario = self.engine.synthesize_scenario(description).await?;

        if scenario.behavior_definition.trim().is_empty() {
            return Err(AtriumError::internal(
                "dialogue engine returned an empty behavior definition",
            ));
        }

        let context_id = mint_custom_context_id();
        tracing::debug!(target: "roleplay", context_id, "custom context created");
        Ok(context_from_scenario(scenario, context_id, owner_id))
    }

    /// Produces the counterpart's next reply.
    ///
    /// The supplied `behavior_definition` is authoritative regardless of
    /// where the context originally came from; the catalog is never
    /// consulted here. `transcript` is everything said so far, oldest
    /// first, not including `message`.
    ///
    /// # Errors
    ///
    /// - `InvalidState`: the behavior definition is missing, which means
    ///   the caller lost the context (e.g. a custom one after a restart)
    /// - `Upstream`: the dialogue engine is unavailable
    pub async fn advance(
        &self,
        context_id: &str,
        behavior_definition: &str,
        transcript: &[TranscriptTurn],
        message: &str,
    ) -> Result<String> {
        require_definition(context_id, behavior_definition)?;
        self.engine
            .reply(behavior_definition, transcript, message)
            .await
    }

    /// Produces a performance evaluation for a finished conversation.
    ///
    /// Stateless like [`advance`](Self::advance): repeat calls with the
    /// same transcript are independent and both succeed.
    ///
    /// # Errors
    ///
    /// Same contract as [`advance`](Self::advance).
    pub async fn evaluate(
        &self,
        context_id: &str,
        behavior_definition: &str,
        transcript: &[TranscriptTurn],
    ) -> Result<String> {
        require_definition(context_id, behavior_definition)?;
        self.engine.evaluate(behavior_definition, transcript).await
    }
}

fn require_definition(context_id: &str, behavior_definition: &str) -> Result<()> {
    if behavior_definition.trim().is_empty() {
        return Err(AtriumError::invalid_state(format!(
            "context '{}' has no behavior definition; the caller must supply it on every call",
            context_id
        )));
    }
    Ok(())
}

/// Mints an id in the reserved `custom-` namespace.
fn mint_custom_context_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", CUSTOM_CONTEXT_PREFIX, &hex[..8])
}

fn context_from_scenario(
    scenario: Scenario,
    context_id: String,
    owner_id: &str,
) -> RoleplayContext {
    RoleplayContext {
        context_id,
        owner_id: owner_id.to_string(),
        name: scenario.name,
        description: scenario.description,
        behavior_definition: scenario.behavior_definition,
        opening_line: scenario.opening_line,
        context: scenario.context,
        goal: scenario.goal,
        tone: scenario.tone,
    }
}
