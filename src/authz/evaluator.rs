use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::identity::Identity;
use crate::store::Rbac;

/// What a protected target demands of the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessRule {
    /// Any authenticated identity is permitted
    Unrestricted,
    /// Caller's role must appear in this closed list (case-insensitive)
    AnyRole { roles: Vec<String> },
    /// Caller's role must grant this catalog permission
    Permission { name: String },
}

impl AccessRule {
    pub fn any_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AccessRule::AnyRole {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permission(name: impl Into<String>) -> Self {
        AccessRule::Permission { name: name.into() }
    }
}

/// Terminal outcome of one evaluation. Never an error and never logged as
/// a failure; upstream callers turn it into a render or a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Granted,
    RedirectToSignIn,
    RedirectToUnauthorized,
}

/// Pluggable seam for the policy decision. Evaluation is pure with respect
/// to its inputs: same identity, same rule, same registry state, same answer.
pub trait PolicyEvaluator: Send + Sync {
    fn evaluate(&self, identity: &Identity, rule: &AccessRule) -> AccessDecision;
}

/// Standard evaluator: role membership against a closed list, or permission
/// lookup through the role registry.
#[derive(Clone)]
pub struct RoleEvaluator {
    rbac: Arc<Rbac>,
}

impl RoleEvaluator {
    pub fn new(rbac: Arc<Rbac>) -> Self {
        Self { rbac }
    }
}

impl PolicyEvaluator for RoleEvaluator {
    fn evaluate(&self, identity: &Identity, rule: &AccessRule) -> AccessDecision {
        if !identity.is_authenticated {
            return AccessDecision::RedirectToSignIn;
        }

        let allowed = match rule {
            AccessRule::Unrestricted => true,
            AccessRule::AnyRole { roles } => match identity.role.as_deref() {
                // no role at all means denial for any restricted target
                None => false,
                Some(role) => roles.iter().any(|r| r.eq_ignore_ascii_case(role)),
            },
            AccessRule::Permission { name } => match identity.role.as_deref() {
                None => false,
                Some(role) => self
                    .rbac
                    .role_permissions(role)
                    .map_or(false, |perms| perms.iter().any(|p| p == name)),
            },
        };

        if allowed {
            AccessDecision::Granted
        } else {
            tracing::debug!(
                user_id = %identity.id,
                role = identity.role.as_deref().unwrap_or("<none>"),
                ?rule,
                "access denied"
            );
            AccessDecision::RedirectToUnauthorized
        }
    }
}
