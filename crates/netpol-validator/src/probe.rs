//! # Probes
//!
//! A probe is one bounded-timeout reachability check against one
//! `(address, port)` pair. Probes never retry; every retry decision lives in
//! the callers ([`batch`](crate::batch), [`gate`](crate::gate)).
//!
//! [`Prober`] is the seam between the engine and the network. The engine
//! ships [`HttpProber`] (HTTP 200 on `/`) and [`TcpProber`] (handshake only);
//! tests substitute scripted implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::net::TcpStream;

use crate::config::{ProbeConfig, ProbeMode};
use crate::connection::{ConnectionTarget, ProbeOutcome};
use crate::error::ValidatorResult;

/// Raw result of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub succeeded: bool,
    pub observed_at: DateTime<Utc>,
}

impl ProbeReport {
    pub fn now(succeeded: bool) -> Self {
        Self {
            succeeded,
            observed_at: Utc::now(),
        }
    }
}

/// A single reachability check.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: &str, port: u16) -> ProbeReport;
}

/// Probe `target` once and wrap the report as a [`ProbeOutcome`].
pub async fn probe_target(prober: &dyn Prober, target: &ConnectionTarget) -> ProbeOutcome {
    let report = prober.probe(&target.address, target.port).await;
    ProbeOutcome {
        target: target.clone(),
        succeeded: report.succeeded,
        observed_at: report.observed_at,
    }
}

/// Build the prober selected by `config.mode`.
pub fn from_config(config: &ProbeConfig) -> ValidatorResult<Arc<dyn Prober>> {
    Ok(match config.mode {
        ProbeMode::Http => Arc::new(HttpProber::new(config.timeout())?),
        ProbeMode::Tcp => Arc::new(TcpProber::new(config.timeout())),
    })
}

// ─── HTTP ───────────────────────────────────────────────────────────────

/// `GET http://address:port/`; reachable means the request completed within
/// the timeout with status 200.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> ValidatorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, address: &str, port: u16) -> ProbeReport {
        let url = probe_url(address, port);
        tracing::debug!(%url, "Sending probe request");

        match self.client.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(%url, status = status.as_u16(), "Probe response");
                ProbeReport::now(status == reqwest::StatusCode::OK)
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "Probe failed");
                ProbeReport::now(false)
            }
        }
    }
}

fn probe_url(address: &str, port: u16) -> String {
    if address.contains(':') && !address.starts_with('[') {
        format!("http://[{address}]:{port}")
    } else {
        format!("http://{address}:{port}")
    }
}

// ─── TCP ────────────────────────────────────────────────────────────────

/// Reachable means a TCP handshake completed within the timeout.
#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, address: &str, port: u16) -> ProbeReport {
        let host = address.trim_start_matches('[').trim_end_matches(']');
        match tokio::time::timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => {
                tracing::debug!(address, port, "TCP probe connected");
                ProbeReport::now(true)
            }
            Ok(Err(e)) => {
                tracing::debug!(address, port, error = %e, "TCP probe refused");
                ProbeReport::now(false)
            }
            Err(_) => {
                tracing::debug!(
                    address,
                    port,
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "TCP probe timed out"
                );
                ProbeReport::now(false)
            }
        }
    }
}
