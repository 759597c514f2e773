use serde::Serialize;
use utoipa::ToSchema;

use super::evaluator::{AccessDecision, AccessRule, PolicyEvaluator};
use super::identity::Identity;
use super::roles;

/// One console menu entry and the rule guarding it. Visibility and route
/// enforcement both read this table, through the same evaluator.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavEntry {
    #[schema(example = "inventory")]
    pub key: &'static str,
    #[schema(example = "Inventory")]
    pub label: &'static str,
    #[serde(skip)]
    pub rule: AccessRule,
}

impl NavEntry {
    fn new(key: &'static str, label: &'static str, rule: AccessRule) -> Self {
        Self { key, label, rule }
    }
}

/// The console's navigation table. Declarative so enforcement can never
/// drift from what the menu shows.
pub fn default_nav() -> Vec<NavEntry> {
    vec![
        NavEntry::new("dashboard", "Dashboard", AccessRule::Unrestricted),
        NavEntry::new("attendance", "Attendance", AccessRule::Unrestricted),
        NavEntry::new(
            "inventory",
            "Inventory",
            AccessRule::any_role([roles::ADMIN, roles::MANAGER]),
        ),
        NavEntry::new(
            "orders",
            "Orders",
            AccessRule::any_role([roles::ADMIN, roles::MANAGER]),
        ),
        NavEntry::new(
            "maintenance",
            "Maintenance",
            AccessRule::any_role([roles::ADMIN, roles::MANAGER, roles::TECHNICIAN]),
        ),
        NavEntry::new(
            "reports",
            "Reports",
            AccessRule::any_role([roles::ADMIN, roles::MANAGER, roles::VIEWER]),
        ),
        NavEntry::new("users", "Users", AccessRule::any_role([roles::ADMIN])),
        NavEntry::new("roles", "Roles & Permissions", AccessRule::any_role([roles::ADMIN])),
        NavEntry::new("activity", "Activity Log", AccessRule::any_role([roles::ADMIN])),
        NavEntry::new("settings", "Settings", AccessRule::any_role([roles::ADMIN])),
    ]
}

/// Entries the caller may see. Denied entries are omitted, not disabled.
pub fn visible_entries<'a, E: PolicyEvaluator + ?Sized>(
    evaluator: &E,
    identity: &Identity,
    nav: &'a [NavEntry],
) -> Vec<&'a NavEntry> {
    nav.iter()
        .filter(|entry| evaluator.evaluate(identity, &entry.rule) == AccessDecision::Granted)
        .collect()
}
