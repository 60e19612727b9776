//! Validates a connection-group file from this machine and prints the
//! result records as JSON.
//!
//! ```bash
//! NETPOL_VALIDATOR_PROBE_MODE=tcp cargo run --example validate_groups -- groups.json
//! ```
//!
//! `groups.json` holds the same payload an agent receives on `/check`:
//!
//! ```json
//! [{"addresses": ["10.128.4.7"], "ports": [8080], "netpol": "ingress-0-1"}]
//! ```

use std::time::Duration;

use netpol_validator::{ValidationEngine, ValidatorConfig, connection, probe};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: validate_groups <groups.json>")?;
    let targets = connection::parse_groups(&std::fs::read(&path)?)?;
    println!("Validating {} connection(s) from {path}", targets.len());

    let config = ValidatorConfig::discover(None)?;
    config.validate()?;
    let prober = probe::from_config(&config.probe)?;
    let engine = ValidationEngine::new(config, prober);

    let report = engine.run(targets).await;
    println!(
        "{} converged in batch, {} handed to the failure drain",
        report.distribution.converged, report.distribution.handed_off
    );

    // Give the drain a short grace period for stragglers.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(30);
    while engine.queued_failures() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    engine.shutdown().await;

    println!("{}", serde_json::to_string_pretty(&engine.results())?);
    if engine.queued_failures() > 0 {
        println!("{} connection(s) still unreachable", engine.queued_failures());
    }
    Ok(())
}
