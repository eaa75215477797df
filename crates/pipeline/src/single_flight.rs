//! Per-project run serialization.
//!
//! At most one generation run per project may be in flight in this
//! process. A run holds a [`RunGuard`]; dropping the guard (on success,
//! error, timeout, or panic unwinding) frees the slot.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use scribe_core::types::DbId;

/// Registry of projects with a run in flight.
#[derive(Debug, Default, Clone)]
pub struct RunRegistry {
    active: Arc<Mutex<HashSet<DbId>>>,
}

/// Proof that the holder owns the run slot for `project_id`.
#[derive(Debug)]
#[must_use = "the run slot is released when the guard is dropped"]
pub struct RunGuard {
    registry: RunRegistry,
    project_id: DbId,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `project_id`, or `None` if a run already holds it.
    pub fn try_acquire(&self, project_id: DbId) -> Option<RunGuard> {
        if !self.lock().insert(project_id) {
            return None;
        }
        Some(RunGuard {
            registry: self.clone(),
            project_id,
        })
    }

    pub fn is_running(&self, project_id: DbId) -> bool {
        self.lock().contains(&project_id)
    }

    /// Number of projects with a run in flight.
    pub fn active(&self) -> usize {
        self.lock().len()
    }

    // The set is only ever mutated by single insert/remove calls, so a
    // poisoned lock still holds a consistent set.
    fn lock(&self) -> MutexGuard<'_, HashSet<DbId>> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.project_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_until_release() {
        let registry = RunRegistry::new();
        let project = uuid::Uuid::new_v4();

        let guard = registry.try_acquire(project).unwrap();
        assert!(registry.is_running(project));
        assert!(registry.try_acquire(project).is_none());

        drop(guard);
        assert!(!registry.is_running(project));
        assert!(registry.try_acquire(project).is_some());
    }

    #[test]
    fn projects_are_independent() {
        let registry = RunRegistry::new();
        let _a = registry.try_acquire(uuid::Uuid::new_v4()).unwrap();
        let b = registry.try_acquire(uuid::Uuid::new_v4());
        assert!(b.is_some());
        assert_eq!(registry.active(), 2);

        drop(b);
        assert_eq!(registry.active(), 1);
    }

    #[test]
    fn guard_is_released_on_panic() {
        let registry = RunRegistry::new();
        let project = uuid::Uuid::new_v4();
        let cloned = registry.clone();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = cloned.try_acquire(project).unwrap();
            panic!("run blew up");
        }));

        assert!(result.is_err());
        assert!(!registry.is_running(project));
    }
}
