//! Roleplay context domain model.
//!
//! A roleplay context carries the full behavioral definition of a simulated
//! counterpart. For catalog-registered scenarios the definition also lives
//! server-side; for ad hoc ("custom") contexts the caller-held copy is the
//! only copy, which is why every subsequent call must resend it.

use serde::{Deserialize, Serialize};

/// Namespace marker for caller-minted custom context identifiers.
///
/// A context id carrying this prefix never resolves in the durable
/// scenario catalog: the caller is responsible for retaining and
/// resending the behavior definition on every call.
pub const CUSTOM_CONTEXT_PREFIX: &str = "custom-";

/// Whether a context id belongs to the custom (non-catalog) namespace.
pub fn is_custom_context_id(context_id: &str) -> bool {
    context_id.starts_with(CUSTOM_CONTEXT_PREFIX)
}

/// Represents the role of a turn in a roleplay transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The trainee driving the simulation.
    User,
    /// The simulated counterpart.
    Counterpart,
}

/// A single turn in a roleplay transcript.
///
/// The transcript is caller-owned and append-only from the caller's
/// perspective; the server never stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: TurnRole,
    pub content: String,
}

impl TranscriptTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn counterpart(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Counterpart,
            content: content.into(),
        }
    }
}

/// A roleplay session descriptor returned at creation time.
///
/// Contains everything the caller needs to run the simulation without the
/// server holding any per-session state: the behavior definition is always
/// present so both catalog and custom contexts are handled uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleplayContext {
    /// Scenario id for catalog contexts, `custom-<hex>` for ad hoc ones.
    pub context_id: String,
    /// Identifier of the user who created the context.
    pub owner_id: String,
    /// Display name of the scenario.
    pub name: String,
    /// Short description of the situation.
    pub description: String,
    /// Full instruction payload defining the counterpart's behavior.
    pub behavior_definition: String,
    /// The counterpart's first line, spoken before any user turn.
    pub opening_line: String,
    /// Who the user is talking to and why.
    pub context: String,
    /// What the user needs to achieve.
    pub goal: String,
    /// Short characterization of the counterpart's demeanor.
    pub tone: String,
}

impl RoleplayContext {
    /// Whether this context lives only on the caller's side.
    pub fn is_custom(&self) -> bool {
        is_custom_context_id(&self.context_id)
    }
}

/// Client-visible state of one simulation instance.
///
/// Legal transitions: `Idle -> Selecting -> Active`, `Active -> Active`
/// (each advance), `Active -> Evaluating -> Evaluated`, and the explicit
/// exit `Active -> Idle`. No other backward move is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationPhase {
    Idle,
    Selecting,
    Active,
    Evaluating,
    Evaluated,
}

impl SimulationPhase {
    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(&self, next: SimulationPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, SimulationPhase::Selecting)
                | (Self::Selecting, SimulationPhase::Active)
                | (Self::Active, SimulationPhase::Active)
                | (Self::Active, SimulationPhase::Evaluating)
                | (Self::Active, SimulationPhase::Idle)
                | (Self::Evaluating, SimulationPhase::Evaluated)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_namespace_marker() {
        assert!(is_custom_context_id("custom-a1b2c3d4"));
        assert!(!is_custom_context_id("angry_parent"));
        assert!(!is_custom_context_id(""));
    }

    #[test]
    fn test_phase_forward_transitions() {
        use SimulationPhase::*;
        assert!(Idle.can_transition_to(Selecting));
        assert!(Selecting.can_transition_to(Active));
        assert!(Active.can_transition_to(Active));
        assert!(Active.can_transition_to(Evaluating));
        assert!(Evaluating.can_transition_to(Evaluated));
    }

    #[test]
    fn test_phase_exit_is_the_only_backward_move() {
        use SimulationPhase::*;
        // Explicit exit without evaluation
        assert!(Active.can_transition_to(Idle));
        // Everything else backward is rejected
        assert!(!Selecting.can_transition_to(Idle));
        assert!(!Evaluating.can_transition_to(Active));
        assert!(!Evaluated.can_transition_to(Active));
        assert!(!Evaluated.can_transition_to(Idle));
        // No skipping forward either
        assert!(!Idle.can_transition_to(Active));
        assert!(!Selecting.can_transition_to(Evaluating));
    }

    #[test]
    fn test_transcript_turn_constructors() {
        let turn = TranscriptTurn::user("hello");
        assert_eq!(turn.role, TurnRole::User);
        let turn = TranscriptTurn::counterpart("hi there");
        assert_eq!(turn.role, TurnRole::Counterpart);
    }
}
