//! Scenario catalog types.
//!
//! A scenario is a pre-registered simulation template: a named counterpart
//! with a full behavior definition and an opening line. The catalog is the
//! durable registry that catalog-origin contexts resolve against; custom
//! contexts deliberately have no entry here.

use serde::{Deserialize, Serialize};

/// A catalog-registered simulation template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable catalog identifier (e.g. "angry_parent").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description of the situation.
    pub description: String,
    /// Who the user is talking to and why.
    pub context: String,
    /// What the user needs to achieve.
    pub goal: String,
    /// Short characterization of the counterpart's demeanor.
    pub tone: String,
    /// Full instruction payload defining the counterpart's behavior.
    pub behavior_definition: String,
    /// The counterpart's first line.
    pub opening_line: String,
}

/// A lightweight listing entry for scenario selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<&Scenario> for ScenarioSummary {
    fn from(scenario: &Scenario) -> Self {
        Self {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            description: scenario.description.clone(),
        }
    }
}

/// The durable scenario registry.
///
/// Read-only by design: scenarios are shipped as presets or provisioned
/// out of band. Lookup by id returns `None` for unknown ids, including
/// every id in the custom namespace.
pub trait ScenarioCatalog: Send + Sync {
    /// Resolves a scenario by its catalog id.
    fn get(&self, scenario_id: &str) -> Option<Scenario>;

    /// Lists all registered scenarios.
    fn list(&self) -> Vec<ScenarioSummary>;
}
