//! # Work Distributor
//!
//! Slices the target list into contiguous batches and runs one convergence
//! loop per batch, never more than `parallel_connections` at a time.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::connection::ConnectionTarget;
use crate::convergence::{BatchReport, run_batch};
use crate::engine::EngineContext;

/// Aggregate of every batch's [`BatchReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributionReport {
    pub batches: usize,
    pub targets: usize,
    pub converged: usize,
    pub handed_off: usize,
    pub timed_out_batches: usize,
}

impl DistributionReport {
    fn absorb(&mut self, batch: &BatchReport) {
        self.batches += 1;
        self.targets += batch.size;
        self.converged += batch.converged;
        self.handed_off += batch.handed_off;
        if batch.polling_timed_out {
            self.timed_out_batches += 1;
        }
    }
}

/// Run every batch to completion. Blocks on a free pool slot before each
/// launch and returns once all batches have finished.
pub async fn distribute(
    ctx: &Arc<EngineContext>,
    targets: Arc<[ConnectionTarget]>,
) -> DistributionReport {
    let batch_size = ctx.config.effective_batch_size().max(1);
    let pool = Arc::new(Semaphore::new(ctx.config.parallel_connections.max(1)));
    let mut tasks = JoinSet::new();
    let mut report = DistributionReport::default();

    tracing::info!(
        targets = targets.len(),
        batch_size,
        parallel = ctx.config.parallel_connections,
        "Distributing connection batches"
    );

    for start in (0..targets.len()).step_by(batch_size) {
        let end = (start + batch_size).min(targets.len());
        let Ok(permit) = Arc::clone(&pool).acquire_owned().await else {
            break;
        };

        // Reap whatever finished while we waited for the slot.
        while let Some(joined) = tasks.try_join_next() {
            absorb_joined(&mut report, joined);
        }

        let ctx = Arc::clone(ctx);
        let targets = Arc::clone(&targets);
        tasks.spawn(async move {
            let _permit = permit;
            run_batch(&ctx, &targets[start..end]).await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        absorb_joined(&mut report, joined);
    }

    tracing::info!(
        batches = report.batches,
        converged = report.converged,
        handed_off = report.handed_off,
        timed_out_batches = report.timed_out_batches,
        "All batches processed"
    );

    report
}

fn absorb_joined(
    report: &mut DistributionReport,
    joined: Result<BatchReport, tokio::task::JoinError>,
) {
    match joined {
        Ok(batch) => report.absorb(&batch),
        Err(e) => tracing::error!(error = %e, "Convergence loop task failed"),
    }
}
