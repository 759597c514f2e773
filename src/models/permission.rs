use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of catalog categories. Used for grouped display and the
/// all-or-none bulk selection in the role editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PermissionCategory {
    Users,
    Roles,
    Permissions,
    Settings,
    Reports,
}

impl PermissionCategory {
    pub const ALL: [PermissionCategory; 5] = [
        PermissionCategory::Users,
        PermissionCategory::Roles,
        PermissionCategory::Permissions,
        PermissionCategory::Settings,
        PermissionCategory::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionCategory::Users => "users",
            PermissionCategory::Roles => "roles",
            PermissionCategory::Permissions => "permissions",
            PermissionCategory::Settings => "settings",
            PermissionCategory::Reports => "reports",
        }
    }
}

impl std::fmt::Display for PermissionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Permission {
    /// Unique name in `<category>:<action>` form
    #[schema(example = "users:write")]
    pub name: String,
    #[schema(example = "Create and edit user accounts")]
    pub description: String,
    pub category: PermissionCategory,
    pub created_at: DateTime<Utc>,
}

/// One catalog category with its permissions, in catalog order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionGroup {
    pub category: PermissionCategory,
    pub permissions: Vec<Permission>,
}
