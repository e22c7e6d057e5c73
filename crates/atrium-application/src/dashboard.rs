//! Per-role dashboard configuration.
//!
//! Roles map onto a small closed set of configurations resolved entirely
//! from static data: no I/O, no async, no failure path. Unknown or
//! missing role keys fall back to the member experience so a new or
//! misconfigured account still gets a working dashboard.

use serde::{Deserialize, Serialize};

/// Canonical dashboard roles.
///
/// Several directory keys alias onto one canonical role; parsing is
/// total, with [`Role::Member`] as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Member,
    LeadPastor,
    KidsDirector,
    MediaDirector,
    ServiceDirector,
}

impl Role {
    /// Resolves a directory role key, canonicalizing aliases.
    ///
    /// Unknown keys resolve to [`Role::Member`], never an error.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "admin" => Self::Admin,
            "lead_pastor" | "pastor_principal" => Self::LeadPastor,
            "kids_director" => Self::KidsDirector,
            "media_director" | "editorial_director" => Self::MediaDirector,
            "service_director" => Self::ServiceDirector,
            _ => Self::Member,
        }
    }

    /// All canonical roles, for exhaustive iteration in admin surfaces.
    pub fn all() -> &'static [Role] {
        &[
            Role::Admin,
            Role::Member,
            Role::LeadPastor,
            Role::KidsDirector,
            Role::MediaDirector,
            Role::ServiceDirector,
        ]
    }
}

/// One shortcut card on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

/// The static dashboard layout for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardConfig {
    /// Greeting template; `{name}` is replaced with the display name.
    pub greeting: &'static str,
    pub quick_actions: &'static [QuickAction],
}

impl DashboardConfig {
    /// Renders the greeting for a display name.
    pub fn greeting_for(&self, name: &str) -> String {
        self.greeting.replace("{name}", name)
    }
}

const ASK_ACTION: QuickAction = QuickAction {
    title: "Ask the Assistant",
    description: "Get answers grounded in your ministry's knowledge base",
    route: "/chat",
};

const RESEARCH_ACTION: QuickAction = QuickAction {
    title: "Deep Research",
    description: "Pull sermons and media into the knowledge base by topic",
    route: "/research",
};

const DOJO_ACTION: QuickAction = QuickAction {
    title: "Leadership Dojo",
    description: "Practice hard conversations against a simulated counterpart",
    route: "/dojo",
};

const KNOWLEDGE_ACTION: QuickAction = QuickAction {
    title: "Browse Knowledge",
    description: "Search everything already indexed",
    route: "/knowledge",
};

static MEMBER_CONFIG: DashboardConfig = DashboardConfig {
    greeting: "Welcome back, {name}",
    quick_actions: &[ASK_ACTION, KNOWLEDGE_ACTION],
};

static ADMIN_CONFIG: DashboardConfig = DashboardConfig {
    greeting: "Welcome back, {name}",
    quick_actions: &[ASK_ACTION, RESEARCH_ACTION, DOJO_ACTION, KNOWLEDGE_ACTION],
};

static LEAD_PASTOR_CONFIG: DashboardConfig = DashboardConfig {
    greeting: "Good to see you, Pastor {name}",
    quick_actions: &[RESEARCH_ACTION, DOJO_ACTION, ASK_ACTION],
};

static KIDS_DIRECTOR_CONFIG: DashboardConfig = DashboardConfig {
    greeting: "Hi {name}, ready for Sunday?",
    quick_actions: &[DOJO_ACTION, ASK_ACTION, KNOWLEDGE_ACTION],
};

static MEDIA_DIRECTOR_CONFIG: DashboardConfig = DashboardConfig {
    greeting: "Hi {name}, the library awaits",
    quick_actions: &[RESEARCH_ACTION, KNOWLEDGE_ACTION, ASK_ACTION],
};

static SERVICE_DIRECTOR_CONFIG: DashboardConfig = DashboardConfig {
    greeting: "Hi {name}, let's plan the weekend",
    quick_actions: &[ASK_ACTION, DOJO_ACTION, KNOWLEDGE_ACTION],
};

/// Returns the dashboard configuration for a role.
///
/// Total over [`Role`]; resolution is pure data lookup.
pub fn dashboard_config(role: Role) -> &'static DashboardConfig {
    match role {
        Role::Admin => &ADMIN_CONFIG,
        Role::Member => &MEMBER_CONFIG,
        Role::LeadPastor => &LEAD_PASTOR_CONFIG,
        Role::KidsDirector => &KIDS_DIRECTOR_CONFIG,
        Role::MediaDirector => &MEDIA_DIRECTOR_CONFIG,
        Role::ServiceDirector => &SERVICE_DIRECTOR_CONFIG,
    }
}

/// Convenience resolver straight from a directory role key.
pub fn dashboard_config_for_key(key: &str) -> &'static DashboardConfig {
    dashboard_config(Role::from_key(key))
}
