use std::collections::HashSet;

use chrono::Utc;

use crate::models::permission::{Permission, PermissionCategory, PermissionGroup};

/// The capability set of the admin console. Seeded once at startup; nothing
/// mutates permissions at runtime.
const SEED: &[(PermissionCategory, &str, &str)] = &[
    (PermissionCategory::Users, "users:read", "View user accounts"),
    (PermissionCategory::Users, "users:write", "Create and edit user accounts"),
    (PermissionCategory::Users, "users:delete", "Remove user accounts"),
    (PermissionCategory::Roles, "roles:read", "View roles and their permissions"),
    (PermissionCategory::Roles, "roles:write", "Create and edit roles"),
    (PermissionCategory::Roles, "roles:delete", "Remove unused roles"),
    (PermissionCategory::Permissions, "permissions:read", "View the permission catalog"),
    (PermissionCategory::Settings, "settings:read", "View system settings"),
    (PermissionCategory::Settings, "settings:write", "Change system settings"),
    (PermissionCategory::Reports, "reports:read", "View reports and dashboards"),
    (PermissionCategory::Reports, "reports:export", "Export report data"),
];

/// Read-only permission catalog. All operations are pure reads over data
/// fixed at construction time.
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    permissions: Vec<Permission>,
    names: HashSet<String>,
}

impl PermissionCatalog {
    pub fn new(entries: &[(PermissionCategory, &str, &str)]) -> Self {
        let seeded_at = Utc::now();
        let permissions: Vec<Permission> = entries
            .iter()
            .map(|(category, name, description)| Permission {
                name: (*name).to_string(),
                description: (*description).to_string(),
                category: *category,
                created_at: seeded_at,
            })
            .collect();
        let names = permissions.iter().map(|p| p.name.clone()).collect();
        Self { permissions, names }
    }

    /// The default console capability set.
    pub fn seeded() -> Self {
        Self::new(SEED)
    }

    /// All permissions in catalog (insertion) order.
    pub fn list(&self) -> &[Permission] {
        &self.permissions
    }

    /// Permissions grouped by category, categories and members both in
    /// catalog order. Empty categories are omitted.
    pub fn grouped(&self) -> Vec<PermissionGroup> {
        PermissionCategory::ALL
            .iter()
            .filter_map(|category| {
                let members: Vec<Permission> = self
                    .permissions
                    .iter()
                    .filter(|p| p.category == *category)
                    .cloned()
                    .collect();
                if members.is_empty() {
                    None
                } else {
                    Some(PermissionGroup {
                        category: *category,
                        permissions: members,
                    })
                }
            })
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// First requested name not present in the catalog, if any.
    pub fn first_unknown<'a>(&self, requested: &'a [String]) -> Option<&'a str> {
        requested
            .iter()
            .find(|name| !self.contains(name))
            .map(String::as_str)
    }
}
