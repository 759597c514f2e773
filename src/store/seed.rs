//! Demo provisioning: a handful of roles and users so a fresh instance has
//! something to show. Runs through the normal operations, so the activity
//! log records the provisioning like any other mutation.

use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::role::RoleCreateRequest;
use crate::models::user::{UserCreateRequest, UserStatus};
use crate::store::{Actor, Rbac};

pub fn system_actor() -> Actor {
    Actor {
        id: Uuid::nil(),
        name: "system".to_string(),
    }
}

pub fn seed_demo(rbac: &Rbac) -> AppResult<()> {
    let actor = system_actor();

    let all_permissions: Vec<String> = rbac
        .catalog
        .list()
        .iter()
        .map(|p| p.name.clone())
        .collect();

    rbac.create_role(
        &actor,
        RoleCreateRequest {
            name: "Admin".to_string(),
            description: "Full access to every console area".to_string(),
            permissions: all_permissions,
        },
    )?;
    rbac.create_role(
        &actor,
        RoleCreateRequest {
            name: "Manager".to_string(),
            description: "Runs day-to-day operations and reporting".to_string(),
            permissions: vec![
                "users:read".to_string(),
                "roles:read".to_string(),
                "reports:read".to_string(),
                "reports:export".to_string(),
            ],
        },
    )?;
    rbac.create_role(
        &actor,
        RoleCreateRequest {
            name: "Viewer".to_string(),
            description: "Read-only access to reports".to_string(),
            permissions: vec!["reports:read".to_string()],
        },
    )?;

    rbac.create_user(
        &actor,
        UserCreateRequest {
            name: "Default Admin".to_string(),
            email: "admin@helmdesk.local".to_string(),
            role: "Admin".to_string(),
            status: UserStatus::Active,
            avatar: None,
        },
    )?;

    tracing::info!("demo data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RbacConfig;

    #[test]
    fn demo_seed_is_internally_consistent() {
        let rbac = Rbac::new(RbacConfig::default());
        seed_demo(&rbac).expect("seed must satisfy the store's own validation");

        let roles = rbac.list_roles(None);
        assert_eq!(roles.len(), 3);
        let admin = roles.iter().find(|r| r.role.name == "Admin").unwrap();
        assert_eq!(admin.users_count, 1);
        assert_eq!(rbac.activity_len(), 4);
    }
}
