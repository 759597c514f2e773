use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::user::{User, UserListQuery, UserStatus};

/// User records, insertion-ordered, one lock for the collection.
#[derive(Debug, Default)]
pub struct UserDirectory {
    inner: RwLock<Vec<User>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.inner.write()
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.read().iter().find(|u| u.id == id).cloned()
    }

    /// Text search over name/email/role plus an exact status filter.
    /// A missing or `"all"` status matches everything.
    pub fn list(&self, query: &UserListQuery) -> Vec<User> {
        let users = self.read();
        let needle = query.search.as_deref().map(str::to_lowercase);
        let status = match query.status.as_deref() {
            None | Some("all") => None,
            Some("active") => Some(UserStatus::Active),
            Some("inactive") => Some(UserStatus::Inactive),
            // Unknown filter values match nothing rather than everything
            Some(_) => {
                return Vec::new();
            }
        };

        users
            .iter()
            .filter(|u| match &needle {
                None => true,
                Some(q) => {
                    u.name.to_lowercase().contains(q)
                        || u.email.to_lowercase().contains(q)
                        || u.role.to_lowercase().contains(q)
                }
            })
            .filter(|u| status.map_or(true, |s| u.status == s))
            .filter(|u| match query.role.as_deref() {
                None => true,
                Some(role) => u.role.eq_ignore_ascii_case(role),
            })
            .cloned()
            .collect()
    }

    /// Exact case-insensitive role match: "who holds this role".
    pub fn find_by_role(&self, role: &str) -> Vec<User> {
        self.read()
            .iter()
            .filter(|u| u.role.eq_ignore_ascii_case(role))
            .cloned()
            .collect()
    }

    pub fn count_by_role(&self, role: &str) -> usize {
        count_by_role(&self.read(), role)
    }
}

/// Holder count against a snapshot, for use under an already-held guard.
pub(crate) fn count_by_role(users: &[User], role: &str) -> usize {
    users
        .iter()
        .filter(|u| u.role.eq_ignore_ascii_case(role))
        .count()
}
