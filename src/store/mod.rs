//! In-memory stores for the admin console core.
//!
//! Three collections (role registry, user directory, activity log) each own
//! one read-write lock. Cross-collection checks hold guards in a fixed
//! roles -> users -> audit order so they always see a consistent snapshot.
//! Every operation validates fully before mutating anything; the audit append
//! happens after the mutation it describes and before the call returns.

pub mod audit;
pub mod catalog;
pub mod roles;
pub mod seed;
pub mod users;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityAction, ActivityEntry, ResourceKind};
use crate::models::role::{Role, RoleCreateRequest, RoleUpdateRequest, RoleWithCount};
use crate::models::user::{User, UserCreateRequest, UserListQuery, UserUpdateRequest};

pub use audit::AuditLog;
pub use catalog::PermissionCatalog;
pub use roles::RoleRegistry;
pub use users::UserDirectory;

/// Who performed a mutation. Snapshotted into audit entries by id and name;
/// a later rename does not rewrite history.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct RbacConfig {
    /// When on (default), user writes must reference an existing role name.
    pub strict_role_refs: bool,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            strict_role_refs: true,
        }
    }
}

impl RbacConfig {
    pub fn from_env() -> Self {
        let strict_role_refs = std::env::var("STRICT_ROLE_REFS")
            .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(true);
        Self { strict_role_refs }
    }
}

/// The RBAC core: catalog, registry, directory and audit log behind one
/// service that owns every invariant between them.
#[derive(Debug)]
pub struct Rbac {
    pub catalog: PermissionCatalog,
    roles: RoleRegistry,
    users: UserDirectory,
    audit: AuditLog,
    config: RbacConfig,
}

impl Rbac {
    pub fn new(config: RbacConfig) -> Self {
        Self::with_catalog(PermissionCatalog::seeded(), config)
    }

    pub fn with_catalog(catalog: PermissionCatalog, config: RbacConfig) -> Self {
        Self {
            catalog,
            roles: RoleRegistry::new(),
            users: UserDirectory::new(),
            audit: AuditLog::new(),
            config,
        }
    }

    // -------------------------------------------------------------------------
    // ROLES
    // -------------------------------------------------------------------------

    pub fn create_role(&self, actor: &Actor, req: RoleCreateRequest) -> AppResult<RoleWithCount> {
        require("name", &req.name)?;
        require("description", &req.description)?;
        self.validate_permission_set(&req.permissions)?;

        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            name: req.name,
            description: req.description,
            permissions: req.permissions,
            created_at: now,
            updated_at: now,
        };
        self.roles.write().push(role.clone());
        self.audit
            .append(actor, ActivityAction::Created, ResourceKind::Role, role.id);
        tracing::info!(role_id = %role.id, name = %role.name, "role created");

        Ok(RoleWithCount {
            role,
            users_count: 0,
        })
    }

    /// Applies only the supplied fields; `created_at` is immutable.
    pub fn update_role(
        &self,
        actor: &Actor,
        id: Uuid,
        req: RoleUpdateRequest,
    ) -> AppResult<RoleWithCount> {
        let updated = {
            let mut roles = self.roles.write();
            let role = roles
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| AppError::not_found(format!("role {id} not found")))?;

            // validate every supplied field before touching any of them
            if let Some(name) = &req.name {
                require("name", name)?;
            }
            if let Some(description) = &req.description {
                require("description", description)?;
            }
            if let Some(permissions) = &req.permissions {
                self.validate_permission_set(permissions)?;
            }

            if let Some(name) = req.name {
                role.name = name;
            }
            if let Some(description) = req.description {
                role.description = description;
            }
            if let Some(permissions) = req.permissions {
                role.permissions = permissions;
            }
            role.updated_at = Utc::now();
            role.clone()
        };

        let users_count = self.users.count_by_role(&updated.name);
        self.audit
            .append(actor, ActivityAction::Updated, ResourceKind::Role, id);
        tracing::info!(role_id = %id, "role updated");

        Ok(RoleWithCount {
            role: updated,
            users_count,
        })
    }

    /// Refused while any user still holds the role; the error carries the
    /// live holder count so the caller can reassign first.
    pub fn delete_role(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        let removed = {
            let mut roles = self.roles.write();
            let idx = roles
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| AppError::not_found(format!("role {id} not found")))?;

            // users guard taken while roles is held: a concurrent assignment
            // cannot slip between the count and the removal
            let holders = users::count_by_role(&self.users.read(), &roles[idx].name);
            if holders > 0 {
                return Err(AppError::conflict(format!(
                    "role '{}' is in use by {} user(s); reassign them first",
                    roles[idx].name, holders
                )));
            }
            roles.remove(idx)
        };

        self.audit
            .append(actor, ActivityAction::Deleted, ResourceKind::Role, id);
        tracing::info!(role_id = %id, name = %removed.name, "role deleted");
        Ok(())
    }

    pub fn get_role(&self, id: Uuid) -> AppResult<RoleWithCount> {
        let role = self
            .roles
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("role {id} not found")))?;
        let users_count = self.users.count_by_role(&role.name);
        Ok(RoleWithCount { role, users_count })
    }

    pub fn list_roles(&self, search: Option<&str>) -> Vec<RoleWithCount> {
        let roles = self.roles.list(search);
        let users = self.users.read();
        roles
            .into_iter()
            .map(|role| {
                let users_count = users::count_by_role(&users, &role.name);
                RoleWithCount { role, users_count }
            })
            .collect()
    }

    /// Permission names granted to a role, looked up case-insensitively.
    /// Used by the access evaluator; absent role means no capabilities.
    pub fn role_permissions(&self, role_name: &str) -> Option<Vec<String>> {
        self.roles.find_by_name(role_name).map(|r| r.permissions)
    }

    fn validate_permission_set(&self, permissions: &[String]) -> AppResult<()> {
        if permissions.is_empty() {
            return Err(AppError::validation("at least one permission is required"));
        }
        if let Some(unknown) = self.catalog.first_unknown(permissions) {
            return Err(AppError::validation(format!(
                "unknown permission '{unknown}'"
            )));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // USERS
    // -------------------------------------------------------------------------

    pub fn create_user(&self, actor: &Actor, req: UserCreateRequest) -> AppResult<User> {
        require("name", &req.name)?;
        require("email", &req.email)?;
        validate_email(&req.email)?;
        require("role", &req.role)?;

        let user = {
            // roles before users, per the fixed lock order
            let roles = self.roles.read();
            self.check_role_ref(&roles, &req.role)?;

            let now = Utc::now();
            let user = User {
                id: Uuid::new_v4(),
                name: req.name,
                email: req.email,
                role: req.role,
                status: req.status,
                last_active: now,
                created_at: now,
                avatar: req.avatar,
            };
            self.users.write().push(user.clone());
            user
        };

        self.audit
            .append(actor, ActivityAction::Created, ResourceKind::User, user.id);
        tracing::info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }

    pub fn update_user(
        &self,
        actor: &Actor,
        id: Uuid,
        req: UserUpdateRequest,
    ) -> AppResult<User> {
        let updated = {
            // roles before users, per the fixed lock order
            let roles = if req.role.is_some() {
                Some(self.roles.read())
            } else {
                None
            };
            let mut users = self.users.write();
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| AppError::not_found(format!("user {id} not found")))?;

            // validate every supplied field before touching any of them
            if let Some(name) = &req.name {
                require("name", name)?;
            }
            if let Some(email) = &req.email {
                require("email", email)?;
                validate_email(email)?;
            }
            if let Some(role) = &req.role {
                require("role", role)?;
            }
            if let (Some(roles), Some(role)) = (&roles, &req.role) {
                self.check_role_ref(roles, role)?;
            }

            if let Some(name) = req.name {
                user.name = name;
            }
            if let Some(email) = req.email {
                user.email = email;
            }
            if let Some(role) = req.role {
                user.role = role;
            }
            if let Some(status) = req.status {
                user.status = status;
            }
            if let Some(avatar) = req.avatar {
                user.avatar = Some(avatar);
            }
            user.clone()
        };

        self.audit
            .append(actor, ActivityAction::Updated, ResourceKind::User, id);
        tracing::info!(user_id = %id, "user updated");
        Ok(updated)
    }

    pub fn delete_user(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        {
            let mut users = self.users.write();
            let idx = users
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| AppError::not_found(format!("user {id} not found")))?;
            users.remove(idx);
        }

        self.audit
            .append(actor, ActivityAction::Deleted, ResourceKind::User, id);
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("user {id} not found")))
    }

    pub fn list_users(&self, query: &UserListQuery) -> Vec<User> {
        self.users.list(query)
    }

    pub fn find_users_by_role(&self, role: &str) -> Vec<User> {
        self.users.find_by_role(role)
    }

    fn check_role_ref(&self, roles: &[Role], role_name: &str) -> AppResult<()> {
        if self.config.strict_role_refs && roles::find_by_name(roles, role_name).is_none() {
            return Err(AppError::validation(format!("unknown role '{role_name}'")));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // ACTIVITY
    // -------------------------------------------------------------------------

    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.audit.list()
    }

    pub fn activity_by_actor(&self, actor_id: Uuid) -> Vec<ActivityEntry> {
        self.audit.list_by_actor(actor_id)
    }

    pub fn activity_len(&self) -> usize {
        self.audit.len()
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Shape check only: non-blank local part, an `@`, and a dotted domain.
/// Deliverability is not this system's problem.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    if email_shape_ok(email) {
        Ok(())
    } else {
        Err(AppError::validation(format!("invalid email '{email}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserStatus;

    fn rbac() -> Rbac {
        Rbac::new(RbacConfig::default())
    }

    fn actor() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: "Test Admin".to_string(),
        }
    }

    fn editor_role(rbac: &Rbac, actor: &Actor) -> RoleWithCount {
        rbac.create_role(
            actor,
            RoleCreateRequest {
                name: "Editor".to_string(),
                description: "Edits things".to_string(),
                permissions: vec!["users:read".to_string()],
            },
        )
        .expect("role create")
    }

    fn alice(rbac: &Rbac, actor: &Actor, role: &str) -> User {
        rbac.create_user(
            actor,
            UserCreateRequest {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                role: role.to_string(),
                status: UserStatus::Active,
                avatar: None,
            },
        )
        .expect("user create")
    }

    #[test]
    fn create_then_get_round_trips() {
        let rbac = rbac();
        let actor = actor();
        let created = editor_role(&rbac, &actor);
        let fetched = rbac.get_role(created.role.id).unwrap();
        assert_eq!(fetched.role.name, "Editor");
        assert_eq!(fetched.role.description, "Edits things");
        assert_eq!(fetched.role.permissions, vec!["users:read"]);
        assert_eq!(fetched.role.created_at, created.role.created_at);
        assert_eq!(fetched.users_count, 0);
    }

    #[test]
    fn empty_description_rejects_and_changes_nothing() {
        let rbac = rbac();
        let actor = actor();
        let catalog_before = rbac.catalog.list().len();

        let err = rbac
            .create_role(
                &actor,
                RoleCreateRequest {
                    name: "Ghost".to_string(),
                    description: "  ".to_string(),
                    permissions: vec!["users:read".to_string()],
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(rbac.catalog.list().len(), catalog_before);
        assert!(rbac.list_roles(None).is_empty());
        assert_eq!(rbac.activity_len(), 0);
    }

    #[test]
    fn unknown_permission_rejects_creation() {
        let rbac = rbac();
        let err = rbac
            .create_role(
                &actor(),
                RoleCreateRequest {
                    name: "Pilot".to_string(),
                    description: "Flies".to_string(),
                    permissions: vec!["users:read".to_string(), "planes:fly".to_string()],
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("planes:fly"));
        assert!(rbac.list_roles(None).is_empty());
        assert_eq!(rbac.activity_len(), 0);
    }

    #[test]
    fn empty_permission_set_rejects_creation() {
        let rbac = rbac();
        let err = rbac
            .create_role(
                &actor(),
                RoleCreateRequest {
                    name: "Empty".to_string(),
                    description: "No powers".to_string(),
                    permissions: vec![],
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let rbac = rbac();
        let actor = actor();
        let created = editor_role(&rbac, &actor);

        let updated = rbac
            .update_role(
                &actor,
                created.role.id,
                RoleUpdateRequest {
                    description: Some("Edits more things".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.role.name, "Editor");
        assert_eq!(updated.role.description, "Edits more things");
        assert_eq!(updated.role.permissions, vec!["users:read"]);
        assert_eq!(updated.role.created_at, created.role.created_at);
        assert!(updated.role.updated_at >= created.role.updated_at);
    }

    #[test]
    fn update_missing_role_is_not_found() {
        let rbac = rbac();
        let err = rbac
            .update_role(&actor(), Uuid::new_v4(), RoleUpdateRequest::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(rbac.activity_len(), 0);
    }

    #[test]
    fn delete_role_in_use_conflicts_and_leaves_state_alone() {
        let rbac = rbac();
        let actor = actor();
        let role = editor_role(&rbac, &actor);
        let user = alice(&rbac, &actor, "Editor");
        let log_before = rbac.activity_len();

        let err = rbac.delete_role(&actor, role.role.id).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(err.to_string().contains("1 user"));

        assert!(rbac.get_role(role.role.id).is_ok());
        assert!(rbac.get_user(user.id).is_ok());
        assert_eq!(rbac.activity_len(), log_before);
    }

    #[test]
    fn delete_role_succeeds_after_reassignment() {
        let rbac = rbac();
        let actor = actor();
        let editor = editor_role(&rbac, &actor);
        let viewer = rbac
            .create_role(
                &actor,
                RoleCreateRequest {
                    name: "Viewer".to_string(),
                    description: "Reads things".to_string(),
                    permissions: vec!["reports:read".to_string()],
                },
            )
            .unwrap();
        let user = alice(&rbac, &actor, "Editor");

        rbac.update_user(
            &actor,
            user.id,
            UserUpdateRequest {
                role: Some("Viewer".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        rbac.delete_role(&actor, editor.role.id).unwrap();
        assert!(matches!(
            rbac.get_role(editor.role.id),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(rbac.get_role(viewer.role.id).unwrap().users_count, 1);
    }

    #[test]
    fn users_count_follows_directory_case_insensitively() {
        let rbac = rbac();
        let actor = actor();
        let role = editor_role(&rbac, &actor);
        alice(&rbac, &actor, "EDITOR");

        assert_eq!(rbac.get_role(role.role.id).unwrap().users_count, 1);
        let held = rbac.find_users_by_role("editor");
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].name, "Alice");
    }

    #[test]
    fn strict_role_refs_rejects_unknown_role() {
        let rbac = rbac();
        let err = rbac
            .create_user(
                &actor(),
                UserCreateRequest {
                    name: "Bob".to_string(),
                    email: "bob@example.com".to_string(),
                    role: "Nonexistent".to_string(),
                    status: UserStatus::Active,
                    avatar: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(rbac.activity_len(), 0);
    }

    #[test]
    fn lenient_mode_allows_free_text_roles() {
        let rbac = Rbac::new(RbacConfig {
            strict_role_refs: false,
        });
        let user = rbac
            .create_user(
                &actor(),
                UserCreateRequest {
                    name: "Bob".to_string(),
                    email: "bob@example.com".to_string(),
                    role: "Legacy Import".to_string(),
                    status: UserStatus::Active,
                    avatar: None,
                },
            )
            .unwrap();
        assert_eq!(user.role, "Legacy Import");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["plainaddress", "missing@tld", "@nolocal.com", "two words@x.com"] {
            let rbac = rbac();
            let err = rbac
                .create_user(
                    &actor(),
                    UserCreateRequest {
                        name: "Bob".to_string(),
                        email: email.to_string(),
                        role: "Editor".to_string(),
                        status: UserStatus::Active,
                        avatar: None,
                    },
                )
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{email} passed");
        }
    }

    #[test]
    fn every_successful_mutation_appends_exactly_one_entry() {
        let rbac = rbac();
        let actor = actor();
        let role = editor_role(&rbac, &actor); // 1
        let user = alice(&rbac, &actor, "Editor"); // 2

        // rejected operations append nothing
        let _ = rbac.delete_role(&actor, role.role.id); // conflict
        let _ = rbac.update_role(&actor, Uuid::new_v4(), RoleUpdateRequest::default());

        rbac.update_user(
            &actor,
            user.id,
            UserUpdateRequest {
                name: Some("Alice B".to_string()),
                ..Default::default()
            },
        )
        .unwrap(); // 3
        rbac.delete_user(&actor, user.id).unwrap(); // 4
        rbac.delete_role(&actor, role.role.id).unwrap(); // 5

        let log = rbac.activity();
        assert_eq!(log.len(), 5);
        // newest first
        assert_eq!(log[0].action, ActivityAction::Deleted);
        assert_eq!(log[0].resource, ResourceKind::Role);
        assert_eq!(log[4].action, ActivityAction::Created);
        assert_eq!(log[4].resource, ResourceKind::Role);

        let user_entries: Vec<_> = log
            .iter()
            .filter(|e| e.resource == ResourceKind::User)
            .collect();
        assert_eq!(user_entries.len(), 3);
        assert!(user_entries.iter().all(|e| e.resource_id == user.id));
    }

    #[test]
    fn role_list_filter_matches_name_and_description() {
        let rbac = rbac();
        let actor = actor();
        editor_role(&rbac, &actor);
        rbac.create_role(
            &actor,
            RoleCreateRequest {
                name: "Auditor".to_string(),
                description: "Reviews the activity log".to_string(),
                permissions: vec!["reports:read".to_string()],
            },
        )
        .unwrap();

        assert_eq!(rbac.list_roles(Some("edit")).len(), 1);
        assert_eq!(rbac.list_roles(Some("ACTIVITY")).len(), 1);
        assert_eq!(rbac.list_roles(Some("zzz")).len(), 0);
        let all = rbac.list_roles(None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].role.name, "Editor"); // insertion order
    }
}
