//! # Failure Queue
//!
//! Unbounded holding area for targets that exhausted a convergence loop's
//! retry budget. The drain both consumes from and re-enqueues into it, so a
//! target can cycle here until it succeeds (or, when a maximum is
//! configured, until it is retired as a [`PermanentFailure`]).

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::connection::ConnectionTarget;

/// A queued target plus the number of drain rounds it has already failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedTarget {
    pub target: ConnectionTarget,
    pub drain_attempts: u32,
}

impl QueuedTarget {
    pub fn fresh(target: ConnectionTarget) -> Self {
        Self {
            target,
            drain_attempts: 0,
        }
    }
}

impl Borrow<ConnectionTarget> for QueuedTarget {
    fn borrow(&self) -> &ConnectionTarget {
        &self.target
    }
}

/// A target retired from the drain after `attempts` failed rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermanentFailure {
    #[serde(flatten)]
    pub target: ConnectionTarget,
    pub attempts: u32,
}

/// Multi-producer, multi-consumer FIFO of failing targets.
#[derive(Debug, Default)]
pub struct FailureQueue {
    entries: Mutex<VecDeque<QueuedTarget>>,
    retired: Mutex<Vec<PermanentFailure>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FailureQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: QueuedTarget) {
        lock(&self.entries).push_back(entry);
    }

    pub fn push_all(&self, entries: impl IntoIterator<Item = QueuedTarget>) {
        lock(&self.entries).extend(entries);
    }

    /// Non-blocking bounded pop: returns between 0 and `max` entries,
    /// whatever is queued right now.
    pub fn pop_up_to(&self, max: usize) -> Vec<QueuedTarget> {
        let mut entries = lock(&self.entries);
        let take = entries.len().min(max);
        entries.drain(..take).collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }

    /// Record a target that will not be retried again.
    pub fn retire(&self, entry: QueuedTarget) {
        lock(&self.retired).push(PermanentFailure {
            target: entry.target,
            attempts: entry.drain_attempts,
        });
    }

    pub fn permanent_failures(&self) -> Vec<PermanentFailure> {
        lock(&self.retired).clone()
    }

    pub fn permanent_failure_count(&self) -> usize {
        lock(&self.retired).len()
    }
}
