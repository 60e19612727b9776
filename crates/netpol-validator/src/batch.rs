//! # Batch Tester
//!
//! Probes a list of targets one after another, merges the round's successes
//! into the [`ResultStore`](crate::store::ResultStore) with one lock
//! acquisition, and hands back what failed.

use crate::connection::{AsTarget, ResultRecord};
use crate::engine::EngineContext;
use crate::probe::probe_target;

/// Successes and failures of one batch round. `failed` keeps input order.
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<ResultRecord>,
    pub failed: Vec<T>,
}

impl<T> BatchOutcome<T> {
    pub fn all_failed(&self) -> bool {
        self.succeeded.is_empty()
    }
}

/// Run one round over `items`.
///
/// Each item gets up to `probe.attempts` sequential probes, stopping at the
/// first success.
pub async fn test_batch<T: AsTarget>(ctx: &EngineContext, items: &[T]) -> BatchOutcome<T> {
    let attempts = ctx.config.probe.attempts.max(1);
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for item in items {
        let target = item.target();
        let mut record = None;

        for attempt in 1..=attempts {
            let outcome = probe_target(ctx.prober.as_ref(), target).await;
            if let Some(r) = outcome.into_record() {
                record = Some(r);
                break;
            }
            if attempt == attempts && attempts > 1 {
                tracing::debug!(connection = %target, attempts, "Probe failed on every attempt");
            }
        }

        match record {
            Some(r) => succeeded.push(r),
            None => failed.push(item.clone()),
        }
    }

    ctx.store.extend(succeeded.clone());

    tracing::debug!(
        tested = items.len(),
        succeeded = succeeded.len(),
        failed = failed.len(),
        "Batch round complete"
    );

    BatchOutcome { succeeded, failed }
}
