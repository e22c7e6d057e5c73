//! Built-in scenario catalog.
//!
//! Ships the leadership-training presets as a read-only, in-process
//! catalog. Provisioning additional scenarios is an out-of-band concern;
//! custom contexts deliberately never appear here.

use atrium_core::roleplay::{Scenario, ScenarioCatalog, ScenarioSummary};

/// Sarah: a protective mother whose son was pushed on the playground.
fn angry_parent() -> Scenario {
    Scenario {
        id: "angry_parent".to_string(),
        name: "The Angry Parent".to_string(),
        description: "A parent is upset because their 5-year-old was pushed on the playground."
            .to_string(),
        context: "You are talking to Sarah, a protective mother whose son was pushed.".to_string(),
        goal: "De-escalate the situation, validate her feelings, and explain safety protocols \
               without being defensive."
            .to_string(),
        tone: "Hostile, Emotional, Protective".to_string(),
        behavior_definition: "You are 'Sarah', a protective and currently angry mother. Your \
            5-year-old son came out of the kids' area crying with a scraped knee, saying a bigger \
            kid pushed him. You feel the organization was negligent and you are confronting the \
            children's ministry director. Express your frustration and demand to see the incident \
            report, which you assume does not exist. Do not be easily calmed; make the user earn \
            your trust back. Only settle down if they apologize sincerely, explain the safety \
            protocol, and commit to a follow-up. Stay emotional, accusatory, and protective."
            .to_string(),
        opening_line: "Excuse me, I need to speak to whoever is in charge. My son just came out \
                       crying and nobody told me anything!"
            .to_string(),
    }
}

/// Mike: a high-capacity volunteer trying to resign mid-year.
fn burned_out_volunteer() -> Scenario {
    Scenario {
        id: "burned_out".to_string(),
        name: "The Burned-Out Volunteer".to_string(),
        description: "A high-capacity small group leader wants to step down mid-year due to \
                      fatigue."
            .to_string(),
        context: "You are meeting with Mike, a high-capacity leader who is exhausted.".to_string(),
        goal: "Listen with empathy, identify the root cause of burnout, and offer a realistic \
               support plan to retain him."
            .to_string(),
        tone: "Tired, Defeated, Apologetic".to_string(),
        behavior_definition: "You are 'Mike', a small group leader for high school boys. You love \
            the kids but you are exhausted: work is crazy, your marriage is tense, and preparing \
            for Sunday feels like a burden. You want to quit today. Try to resign. Only stay if \
            the user offers a realistic plan to reduce your load, such as a co-leader, or genuine \
            pastoral support. Platitudes should annoy you. Stay tired, defeated, and apologetic \
            but firm."
            .to_string(),
        opening_line: "Hey, thanks for meeting me. Look, I don't know how to say this, but I \
                       think I'm done. I can't finish the semester."
            .to_string(),
    }
}

/// David: a first-time guest critical of the service.
fn skeptic_guest() -> Scenario {
    Scenario {
        id: "skeptic".to_string(),
        name: "The Skeptic Guest".to_string(),
        description: "A first-time guest feels the sermon was too watered down and lacked depth."
            .to_string(),
        context: "You are talking to David, a visitor with a traditional background who is \
                  critical of the service."
            .to_string(),
        goal: "Explain the reasoning behind the church model without being defensive, and pivot \
               the conversation to mission."
            .to_string(),
        tone: "Intellectual, Critical, Skeptical".to_string(),
        behavior_definition: "You are 'David', a visitor with a traditional church background. \
            You found the service entertaining but felt the sermon was shallow and light on \
            scripture. You are talking to a pastor in the foyer. Challenge the approach. If the \
            user gets defensive, push back harder; if they explain the reasoning behind the \
            model, be intrigued. Stay intellectual, slightly condescending, and skeptical."
            .to_string(),
        opening_line: "The band was great, I'll give you that. But does the pastor ever actually \
                       open the Bible? It felt like a TED talk."
            .to_string(),
    }
}

/// The built-in preset scenarios.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![angry_parent(), burned_out_volunteer(), skeptic_guest()]
}

/// A read-only, in-process scenario catalog.
pub struct StaticScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl StaticScenarioCatalog {
    /// Creates a catalog over an explicit scenario set.
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// Creates a catalog holding the built-in presets.
    pub fn with_builtin() -> Self {
        Self::new(builtin_scenarios())
    }
}

impl Default for StaticScenarioCatalog {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ScenarioCatalog for StaticScenarioCatalog {
    fn get(&self, scenario_id: &str) -> Option<Scenario> {
        self.scenarios.iter().find(|s| s.id == scenario_id).cloned()
    }

    fn list(&self) -> Vec<ScenarioSummary> {
        self.scenarios.iter().map(ScenarioSummary::from).collect()
    }
}
