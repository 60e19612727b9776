//! # Convergence Loop
//!
//! Drives one batch from "nothing reachable yet" to either recorded results
//! or a handoff to the failure drain.
//!
//! ```text
//!   Polling ──(any success | deadline)──▶ BoundedRetry ──▶ DrainHandoff
//! ```
//!
//! - **Polling**: every tick, the *whole* batch is re-tested for as long as
//!   every target keeps failing. The first round with a success, or the
//!   deadline, ends polling. A round in progress at the deadline completes.
//! - **BoundedRetry**: a fixed number of back-to-back rounds against only
//!   the remaining failures.
//! - **DrainHandoff**: whatever still fails is queued for the drain.

use tokio::time::{Instant, MissedTickBehavior};

use crate::batch::test_batch;
use crate::connection::ConnectionTarget;
use crate::engine::EngineContext;
use crate::queue::QueuedTarget;

/// Named states of the per-batch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvergenceState {
    Polling,
    BoundedRetry { outstanding: Vec<ConnectionTarget> },
    DrainHandoff { outstanding: Vec<ConnectionTarget> },
    Done,
}

/// What happened to one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub size: usize,
    pub converged: usize,
    pub handed_off: usize,
    pub polling_timed_out: bool,
    pub retry_rounds: u32,
}

/// Run the full state machine for `batch`.
pub async fn run_batch(ctx: &EngineContext, batch: &[ConnectionTarget]) -> BatchReport {
    let mut report = BatchReport {
        size: batch.len(),
        ..BatchReport::default()
    };
    if batch.is_empty() {
        return report;
    }

    let mut state = ConvergenceState::Polling;
    loop {
        state = match state {
            ConvergenceState::Polling => {
                let (outstanding, timed_out) = poll(ctx, batch).await;
                report.polling_timed_out = timed_out;
                ConvergenceState::BoundedRetry { outstanding }
            }
            ConvergenceState::BoundedRetry { mut outstanding } => {
                let rounds = ctx.config.convergence.retry_rounds;
                for round in 1..=rounds {
                    if outstanding.is_empty() {
                        break;
                    }
                    outstanding = test_batch(ctx, &outstanding).await.failed;
                    report.retry_rounds = round;
                }
                ConvergenceState::DrainHandoff { outstanding }
            }
            ConvergenceState::DrainHandoff { outstanding } => {
                report.handed_off = outstanding.len();
                if !outstanding.is_empty() {
                    tracing::info!(
                        batch_size = batch.len(),
                        failed = outstanding.len(),
                        "Moving failed connections to the failure drain"
                    );
                    ctx.queue
                        .push_all(outstanding.into_iter().map(QueuedTarget::fresh));
                }
                ConvergenceState::Done
            }
            ConvergenceState::Done => break,
        };
    }

    report.converged = report.size - report.handed_off;
    report
}

/// Polling state. Returns the last computed failure set and whether the
/// deadline ended it.
async fn poll(ctx: &EngineContext, batch: &[ConnectionTarget]) -> (Vec<ConnectionTarget>, bool) {
    let tick = ctx.config.convergence.tick_interval();
    let deadline = Instant::now() + ctx.config.convergence.timeout();

    let mut ticker = tokio::time::interval_at(Instant::now() + tick, tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut failed = batch.to_vec();
    loop {
        tokio::select! {
            biased;

            () = tokio::time::sleep_until(deadline) => {
                warn_timed_out(ctx, batch.len());
                return (failed, true);
            }
            _ = ticker.tick() => {
                let outcome = test_batch(ctx, batch).await;
                failed = outcome.failed;
                if failed.len() != batch.len() {
                    return (failed, false);
                }
                // A round that overran the deadline is the last one.
                if Instant::now() >= deadline {
                    warn_timed_out(ctx, batch.len());
                    return (failed, true);
                }
            }
        }
    }
}

fn warn_timed_out(ctx: &EngineContext, batch_size: usize) {
    tracing::warn!(
        batch_size,
        timeout_secs = ctx.config.convergence.timeout_secs,
        "Timeout reached waiting for the batch to converge"
    );
}
