//! # netpol-validator-agent
//!
//! Per-pod agent for network policy scale tests. Receives the connections
//! this pod is expected to reach on `POST /check`, validates them with the
//! [`netpol_validator`] engine, and serves what it observed on
//! `GET /results`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

mod app;
mod server;

use app::{AgentState, init_tracing, shutdown_signal};
use netpol_validator::{ValidationEngine, ValidatorConfig, ValidatorError, probe};

/// Connectivity validation agent for network policy scale tests.
#[derive(Parser)]
#[command(name = "netpol-validator-agent", version, about)]
struct Cli {
    /// Path to netpol-validator.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address override, e.g. 0.0.0.0:9001
    #[arg(long)]
    listen: Option<String>,

    /// Enable verbose logging (set RUST_LOG for fine-grained control)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ValidatorConfig::discover(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    config.validate()?;

    tracing::info!(
        listen = %config.listen_addr,
        parallel = config.parallel_connections,
        batch_size = config.effective_batch_size(),
        probe = ?config.probe.mode,
        "Starting netpol validator agent"
    );

    let prober = probe::from_config(&config.probe)?;
    let listen_addr = config.listen_addr.clone();
    let engine = Arc::new(ValidationEngine::new(config, prober));

    let listener =
        TcpListener::bind(&listen_addr)
            .await
            .map_err(|e| ValidatorError::BindFailed {
                addr: listen_addr.clone(),
                reason: e.to_string(),
            })?;
    tracing::info!(addr = %listen_addr, "Listening for check requests");

    axum::serve(listener, server::router(AgentState::new(Arc::clone(&engine))))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine.shutdown().await;
    tracing::info!("Agent stopped");
    Ok(())
}
