use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use netpol_validator::{ConnectionTarget, ValidationEngine};

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AgentState {
    pub engine: Arc<ValidationEngine>,
    submitted: Arc<AtomicBool>,
}

impl AgentState {
    pub fn new(engine: Arc<ValidationEngine>) -> Self {
        Self {
            engine,
            submitted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claim the one validation run this agent performs. Returns `false` if
    /// a run was already submitted.
    pub fn claim_run(&self) -> bool {
        !self.submitted.swap(true, Ordering::SeqCst)
    }

    /// Run the engine over `targets` in the background.
    pub fn spawn_run(&self, targets: Vec<ConnectionTarget>) {
        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move {
            let report = engine.run(targets).await;
            tracing::info!(
                gate_rounds = report.gate_rounds,
                batches = report.distribution.batches,
                converged = report.distribution.converged,
                handed_off = report.distribution.handed_off,
                "Validation run finished, failure drain continues"
            );
        });
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "netpol_validator=debug,netpol_validator_agent=debug"
    } else {
        "netpol_validator=info,netpol_validator_agent=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
