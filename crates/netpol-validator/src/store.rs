//! # Result Store
//!
//! Append-only record of every successful probe. One lock guards both the
//! batch merges and the snapshot reads; it is never held across a probe.

use std::sync::{Mutex, MutexGuard};

use crate::connection::{ConnectionTarget, ResultRecord};

/// Mutation-safe, append-only sequence of [`ResultRecord`]s in completion
/// order. Duplicates are kept as delivered.
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Mutex<Vec<ResultRecord>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ResultRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Merge one round's successes under a single lock acquisition.
    pub fn extend(&self, records: Vec<ResultRecord>) {
        if records.is_empty() {
            return;
        }
        self.lock().extend(records);
    }

    /// Point-in-time copy of all records.
    pub fn snapshot(&self) -> Vec<ResultRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of records stored for `target`.
    pub fn count_for(&self, target: &ConnectionTarget) -> usize {
        self.lock().iter().filter(|r| r.matches(target)).count()
    }
}
