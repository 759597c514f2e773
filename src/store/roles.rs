use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::role::Role;

/// Role records, insertion-ordered. One exclusive-write / shared-read lock
/// per collection; guards are exposed crate-internally so cross-collection
/// checks can run against one consistent snapshot.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    inner: RwLock<Vec<Role>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Role>> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<Role>> {
        self.inner.write()
    }

    pub fn get(&self, id: Uuid) -> Option<Role> {
        self.read().iter().find(|r| r.id == id).cloned()
    }

    /// Case-insensitive substring match over name and description;
    /// `None` returns the whole registry in insertion order.
    pub fn list(&self, search: Option<&str>) -> Vec<Role> {
        let roles = self.read();
        match search {
            None => roles.clone(),
            Some(q) => {
                let needle = q.to_lowercase();
                roles
                    .iter()
                    .filter(|r| {
                        r.name.to_lowercase().contains(&needle)
                            || r.description.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect()
            }
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<Role> {
        find_by_name(&self.read(), name).cloned()
    }
}

/// Case-insensitive name lookup against a snapshot.
pub(crate) fn find_by_name<'a>(roles: &'a [Role], name: &str) -> Option<&'a Role> {
    roles.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}
