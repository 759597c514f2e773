use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::activity::{ActivityAction, ActivityEntry, ResourceKind};
use crate::store::Actor;

/// Append-only activity log. New entries go to the head so retrieval is
/// newest-first without a sort; entries are never updated or deleted.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: RwLock<Vec<ActivityEntry>>,
    seq: AtomicU64,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always succeeds. The timestamp is set here, never by the caller.
    pub fn append(
        &self,
        actor: &Actor,
        action: ActivityAction,
        resource: ResourceKind,
        resource_id: Uuid,
    ) -> ActivityEntry {
        let entry = ActivityEntry {
            id: self.seq.fetch_add(1, Ordering::Relaxed) + 1,
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            action,
            resource,
            resource_id,
            occurred_at: Utc::now(),
        };
        self.entries.write().insert(0, entry.clone());
        entry
    }

    /// Newest-first.
    pub fn list(&self) -> Vec<ActivityEntry> {
        self.entries.read().clone()
    }

    /// Newest-first, filtered to one actor.
    pub fn list_by_actor(&self, actor_id: Uuid) -> Vec<ActivityEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.actor_id == actor_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
