//! # netpol-validator
//!
//! Connectivity validation engine for network policy scale tests.
//!
//! A control component hands each agent a list of expected connections
//! (address, port, policy name). The engine probes them until they converge,
//! tolerating the window in which policy objects are still propagating,
//! and keeps a consistent record of every connection that succeeded and
//! when.
//!
//! ## Pipeline
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | Startup gate | [`gate`] | Wait until a sample of policies answers |
//! | Work distributor | [`distributor`] | Batch targets over a bounded pool |
//! | Convergence loop | [`convergence`] | Poll, retry, hand off per batch |
//! | Failure drain | [`drain`] | Slow lane for stubborn failures |
//! | Batch tester | [`batch`] | One probing round, merged into the store |
//! | Result store | [`store`] | Append-only, lock-guarded results |
//!
//! ## Quick Start
//!
//! ```ignore
//! use netpol_validator::{ValidationEngine, ValidatorConfig, connection, probe};
//!
//! #[tokio::main]
//! async fn main() -> netpol_validator::ValidatorResult<()> {
//!     let config = ValidatorConfig::discover(None)?;
//!     let prober = probe::from_config(&config.probe)?;
//!     let engine = ValidationEngine::new(config, prober);
//!
//!     let body = br#"[{"addresses": ["10.128.4.7"], "ports": [8080], "netpol": "ingress-0-1"}]"#;
//!     let targets = connection::parse_groups(body)?;
//!     engine.run(targets).await;
//!
//!     for record in engine.results() {
//!         println!("{} {}:{} at {}", record.policy_name, record.address, record.port, record.timestamp);
//!     }
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod connection;
pub mod convergence;
pub mod distributor;
pub mod drain;
pub mod engine;
pub mod error;
pub mod gate;
pub mod probe;
pub mod queue;
pub mod store;

// ─── Public re-exports ──────────────────────────────────────────────────

pub use config::ValidatorConfig;
pub use connection::{ConnectionGroup, ConnectionTarget, ResultRecord};
pub use engine::{EnginePhase, EngineStatus, RunReport, ValidationEngine};
pub use error::{ValidatorError, ValidatorResult};
pub use probe::Prober;
