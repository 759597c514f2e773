//! Access policy evaluation.
//!
//! One evaluator decides both route access and menu visibility, so the two
//! can never disagree. Outcomes are control flow, not errors: a request is
//! granted, redirected to sign-in, or redirected to the unauthorized page.

mod evaluator;
mod identity;
mod nav;

pub use evaluator::{AccessDecision, AccessRule, PolicyEvaluator, RoleEvaluator};
pub use identity::Identity;
pub use nav::{default_nav, visible_entries, NavEntry};

/// Well-known role names used by the default navigation table.
pub mod roles {
    pub const ADMIN: &str = "Admin";
    pub const MANAGER: &str = "Manager";
    pub const TECHNICIAN: &str = "Technician";
    pub const VIEWER: &str = "Viewer";
}
