//! # Failure Drain
//!
//! Background task that keeps retrying targets the convergence loops gave
//! up on. Every cycle it takes whatever is queued (up to a small group, no
//! waiting), retries that group in a pooled task, and re-enqueues what still
//! fails. It then sleeps briefly whether or not it found work.
//!
//! With `drain.max_attempts = 0` (the default) a target is retried until it
//! succeeds, for as long as the engine lives. A non-zero maximum retires
//! targets as [`PermanentFailure`](crate::queue::PermanentFailure)s instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::batch::test_batch;
use crate::engine::EngineContext;
use crate::queue::QueuedTarget;

/// How long [`FailureDrain::stop`] waits for the loop to exit.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the running drain loop. Dropping it stops the loop.
pub struct FailureDrain {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl FailureDrain {
    /// Start the drain loop on the current runtime.
    pub fn start(ctx: Arc<EngineContext>) -> Self {
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let running = Arc::clone(&running);
            tokio::spawn(async move {
                let pool = Arc::new(Semaphore::new(ctx.config.parallel_connections.max(1)));
                let group_size = ctx.config.drain.batch_size.max(1);
                let interval = ctx.config.drain.interval();

                tracing::info!(group_size, "Failure drain started");

                while running.load(Ordering::SeqCst) {
                    let group = ctx.queue.pop_up_to(group_size);

                    if !group.is_empty() {
                        let Ok(permit) = Arc::clone(&pool).acquire_owned().await else {
                            break;
                        };
                        let ctx = Arc::clone(&ctx);
                        tokio::spawn(async move {
                            let _permit = permit;
                            retry_group(&ctx, group).await;
                        });
                    }

                    tokio::time::sleep(interval).await;
                }

                tracing::debug!("Failure drain stopped");
            })
        };

        Self {
            handle: Some(handle),
            running,
        }
    }

    /// Stop the drain loop. In-flight retries finish on their own.
    pub async fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            match tokio::time::timeout(STOP_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "Failure drain task ended abnormally"),
                Err(_) => tracing::warn!(
                    timeout_secs = STOP_TIMEOUT.as_secs(),
                    "Failure drain did not stop in time, leaving it detached"
                ),
            }
        }
    }

    /// Returns whether the drain loop is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for FailureDrain {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// One retry of a drained group: test once, then requeue or retire the
/// failures.
pub async fn retry_group(ctx: &EngineContext, group: Vec<QueuedTarget>) {
    let outcome = test_batch(ctx, &group).await;
    if !outcome.succeeded.is_empty() {
        tracing::info!(
            recovered = outcome.succeeded.len(),
            "Failure drain recovered connections"
        );
    }

    let max_attempts = ctx.config.drain.max_attempts;
    let mut requeue = Vec::with_capacity(outcome.failed.len());
    for mut entry in outcome.failed {
        entry.drain_attempts = entry.drain_attempts.saturating_add(1);
        if max_attempts > 0 && entry.drain_attempts >= max_attempts {
            tracing::warn!(
                connection = %entry.target,
                policy = %entry.target.policy_name,
                attempts = entry.drain_attempts,
                "Connection permanently failed"
            );
            ctx.queue.retire(entry);
        } else {
            requeue.push(entry);
        }
    }
    ctx.queue.push_all(requeue);
}
