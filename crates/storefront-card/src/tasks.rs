//! Timers owned by a single card.
//!
//! Notification hide/remove steps and the counter highlight removal are
//! delayed tasks. They are spawned into the owning card's [`TaskScope`] so
//! disposing the card aborts whatever is still pending.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::task::JoinSet;

/// A set of background tasks aborted together on [`TaskScope::close`] or drop.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TaskScope {
    tasks: Mutex<Option<JoinSet<()>>>,
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskScope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Some(JoinSet::new())),
        }
    }

    /// Spawns `task` into the scope. Returns `false` (and drops the task
    /// unpolled) once the scope has been closed.
    pub fn spawn<F>(&self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut guard = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(set) = guard.as_mut() else {
            return false;
        };

        // Reap finished tasks so a long-lived card does not accumulate them.
        while set.try_join_next().is_some() {}
        set.spawn(task);
        true
    }

    /// Number of tasks spawned and not yet reaped. Finished tasks are only
    /// reaped on the next spawn, so this is an upper bound.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, JoinSet::len)
    }

    /// Aborts every pending task and refuses new ones.
    pub fn close(&self) {
        let taken = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut set) = taken {
            set.abort_all();
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
