//! # Startup Gate
//!
//! Holds the engine back until the cluster has begun applying policies, so
//! the bounded per-batch retry budget is not burnt against a cluster where
//! nothing is reachable yet.
//!
//! A handful of targets, one per distinct policy, are probed in turn; the
//! first success opens the gate. Until then the sample is retried at a fixed
//! interval, with no timeout.

use std::collections::HashSet;

use crate::connection::ConnectionTarget;
use crate::engine::EngineContext;
use crate::probe::probe_target;

/// Pick up to `max_policies` targets, one per distinct policy name, in
/// first-seen order.
pub fn sample_targets(targets: &[ConnectionTarget], max_policies: usize) -> Vec<ConnectionTarget> {
    let mut seen = HashSet::new();
    let mut sample = Vec::new();

    for target in targets {
        if sample.len() >= max_policies {
            break;
        }
        if seen.insert(target.policy_name.as_str()) {
            sample.push(target.clone());
        }
    }

    sample
}

/// Block until one sampled target answers. Returns the number of sample
/// rounds it took (0 when there was nothing to sample).
pub async fn wait_for_policies(ctx: &EngineContext, targets: &[ConnectionTarget]) -> u64 {
    let sample = sample_targets(targets, ctx.config.startup.sample_policies.max(1));
    if sample.is_empty() {
        tracing::info!("No targets to sample, startup gate open");
        return 0;
    }

    let interval = ctx.config.startup.interval();
    let policies: Vec<&str> = sample.iter().map(|t| t.policy_name.as_str()).collect();
    tracing::info!(?policies, "Waiting for network policy objects to be applied");

    let mut rounds: u64 = 0;
    loop {
        rounds += 1;
        for target in &sample {
            if probe_target(ctx.prober.as_ref(), target).await.succeeded {
                tracing::info!(
                    rounds,
                    policy = %target.policy_name,
                    connection = %target,
                    "Startup gate open"
                );
                return rounds;
            }
        }

        if rounds % 100 == 0 {
            tracing::info!(rounds, "Still waiting for network policy objects");
        }
        tokio::time::sleep(interval).await;
    }
}
