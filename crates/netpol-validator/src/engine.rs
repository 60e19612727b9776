//! # Validation Engine
//!
//! [`EngineContext`] owns everything the tasks share: configuration, the
//! prober, the result store, and the failure queue. It is passed by
//! reference (or `Arc`) to every task; there is no process-wide state.
//!
//! [`ValidationEngine`] sequences a run:
//!
//! 1. wait at the [startup gate](crate::gate) until policies are applied,
//! 2. start the [failure drain](crate::drain),
//! 3. [distribute](crate::distributor) the targets across convergence loops.
//!
//! Results can be read at any point, including mid-run.
//!
//! ```no_run
//! use netpol_validator::{ValidationEngine, ValidatorConfig, probe};
//! use netpol_validator::connection::ConnectionTarget;
//!
//! # async fn demo() -> netpol_validator::ValidatorResult<()> {
//! let config = ValidatorConfig::discover(None)?;
//! let prober = probe::from_config(&config.probe)?;
//! let engine = ValidationEngine::new(config, prober);
//!
//! let targets = vec![ConnectionTarget::new("10.128.4.7", 8080, "ingress-0-1", 0)];
//! let report = engine.run(targets).await;
//! println!("{} converged, {} still retrying", report.distribution.converged, engine.queued_failures());
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;

use crate::config::ValidatorConfig;
use crate::connection::{ConnectionTarget, ResultRecord};
use crate::distributor::{DistributionReport, distribute};
use crate::drain::FailureDrain;
use crate::gate::wait_for_policies;
use crate::probe::Prober;
use crate::queue::{FailureQueue, PermanentFailure};
use crate::store::ResultStore;

/// State shared by every engine task.
pub struct EngineContext {
    pub config: ValidatorConfig,
    pub prober: Arc<dyn Prober>,
    pub store: ResultStore,
    pub queue: FailureQueue,
}

impl EngineContext {
    pub fn new(config: ValidatorConfig, prober: Arc<dyn Prober>) -> Self {
        Self {
            config,
            prober,
            store: ResultStore::new(),
            queue: FailureQueue::new(),
        }
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("config", &self.config)
            .field("results", &self.store.len())
            .field("queued_failures", &self.queue.len())
            .finish_non_exhaustive()
    }
}

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    /// No targets received yet.
    Idle,
    /// Blocked at the startup gate.
    WaitingForPolicies,
    /// Convergence loops running.
    Validating,
    /// All batches done; only the failure drain is still working.
    Draining,
}

/// Summary of one [`ValidationEngine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub gate_rounds: u64,
    pub distribution: DistributionReport,
}

/// Point-in-time view for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub phase: EnginePhase,
    pub targets: usize,
    pub results: usize,
    pub queued_failures: usize,
    pub permanent_failures: usize,
}

/// The per-agent connectivity validation engine.
pub struct ValidationEngine {
    ctx: Arc<EngineContext>,
    phase: watch::Sender<EnginePhase>,
    targets: Mutex<usize>,
    drain: Mutex<Option<FailureDrain>>,
}

impl ValidationEngine {
    pub fn new(config: ValidatorConfig, prober: Arc<dyn Prober>) -> Self {
        let (phase, _) = watch::channel(EnginePhase::Idle);
        Self {
            ctx: Arc::new(EngineContext::new(config, prober)),
            phase,
            targets: Mutex::new(0),
            drain: Mutex::new(None),
        }
    }

    /// Shared context for driving individual stages directly, e.g.
    /// [`gate::wait_for_policies`](crate::gate::wait_for_policies) or
    /// [`convergence::run_batch`](crate::convergence::run_batch), against
    /// the same store and queue [`run`](Self::run) uses.
    pub fn context(&self) -> &Arc<EngineContext> {
        &self.ctx
    }

    /// Validate `targets`: gate, start the drain, then distribute.
    ///
    /// Returns once every batch has either converged or handed its failures
    /// to the drain. The drain keeps running until [`shutdown`](Self::shutdown)
    /// or drop.
    pub async fn run(&self, targets: Vec<ConnectionTarget>) -> RunReport {
        let targets: Arc<[ConnectionTarget]> = targets.into();
        *self
            .targets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = targets.len();

        self.phase.send_replace(EnginePhase::WaitingForPolicies);
        tracing::info!(targets = targets.len(), "Waiting for network policy creation");
        let gate_rounds = wait_for_policies(&self.ctx, &targets).await;
        tracing::info!(gate_rounds, "Finished waiting for network policy creation");

        self.ensure_drain();

        self.phase.send_replace(EnginePhase::Validating);
        let distribution = distribute(&self.ctx, targets).await;
        self.phase.send_replace(EnginePhase::Draining);

        RunReport {
            gate_rounds,
            distribution,
        }
    }

    fn ensure_drain(&self) {
        let mut drain = self
            .drain
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if drain.is_none() {
            *drain = Some(FailureDrain::start(Arc::clone(&self.ctx)));
        }
    }

    /// Stop the failure drain. Used on process shutdown.
    pub async fn shutdown(&self) {
        let drain = self
            .drain
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(mut drain) = drain {
            drain.stop().await;
        }
    }

    pub fn phase(&self) -> EnginePhase {
        *self.phase.borrow()
    }

    pub fn phase_receiver(&self) -> watch::Receiver<EnginePhase> {
        self.phase.subscribe()
    }

    /// Current result snapshot, in completion order.
    pub fn results(&self) -> Vec<ResultRecord> {
        self.ctx.store.snapshot()
    }

    pub fn queued_failures(&self) -> usize {
        self.ctx.queue.len()
    }

    pub fn permanent_failures(&self) -> Vec<PermanentFailure> {
        self.ctx.queue.permanent_failures()
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            phase: self.phase(),
            targets: *self
                .targets
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
            results: self.ctx.store.len(),
            queued_failures: self.ctx.queue.len(),
            permanent_failures: self.ctx.queue.permanent_failure_count(),
        }
    }
}
