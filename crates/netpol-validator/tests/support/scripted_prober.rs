#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use netpol_validator::connection::ConnectionTarget;
use netpol_validator::probe::{ProbeReport, Prober};
use tokio::time::Instant;

/// When a scripted endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Always,
    Never,
    /// Reachable once this much of tokio's clock has passed since the
    /// prober was created.
    After(Duration),
}

/// Prober whose answers follow a per-(address, port) schedule on tokio's
/// clock, so paused-time tests are deterministic.
pub struct ScriptedProber {
    start: Instant,
    default: Reachability,
    latency: Duration,
    rules: Mutex<HashMap<(String, u16), Reachability>>,
    calls: Mutex<HashMap<(String, u16), usize>>,
    total: AtomicUsize,
}

impl ScriptedProber {
    pub fn new(default: Reachability) -> Self {
        Self {
            start: Instant::now(),
            default,
            latency: Duration::ZERO,
            rules: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            total: AtomicUsize::new(0),
        }
    }

    /// Every probe takes `latency` of tokio's clock before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with(self, target: &ConnectionTarget, reachability: Reachability) -> Self {
        self.set(target, reachability);
        self
    }

    pub fn set(&self, target: &ConnectionTarget, reachability: Reachability) {
        self.rules
            .lock()
            .unwrap()
            .insert((target.address.clone(), target.port), reachability);
    }

    pub fn calls_for(&self, target: &ConnectionTarget) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&(target.address.clone(), target.port))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, address: &str, port: u16) -> ProbeReport {
        let key = (address.to_string(), port);
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(key.clone()).or_insert(0) += 1;

        let rule = self
            .rules
            .lock()
            .unwrap()
            .get(&key)
            .copied()
            .unwrap_or(self.default);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let reachable = match rule {
            Reachability::Always => true,
            Reachability::Never => false,
            Reachability::After(delay) => self.start.elapsed() >= delay,
        };
        ProbeReport::now(reachable)
    }
}

/// `n` targets on one address, ports starting at `first_port`.
pub fn targets(policy: &str, ordinal: usize, first_port: u16, n: u16) -> Vec<ConnectionTarget> {
    (0..n)
        .map(|i| ConnectionTarget::new("10.128.0.10", first_port + i, policy, ordinal))
        .collect()
}
