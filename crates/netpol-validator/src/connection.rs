//! # Connection Model
//!
//! Input groups as submitted by the distribution side, the immutable
//! [`ConnectionTarget`]s they expand into, and the [`ResultRecord`]s kept for
//! every successful probe.

use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidatorError, ValidatorResult};

/// One group of expected connections: every address × every port, all
/// allowed by the same network policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionGroup {
    pub addresses: Vec<String>,
    pub ports: Vec<i64>,
    #[serde(rename = "netpol", alias = "policyName")]
    pub policy_name: String,
}

/// A single (address, port) pair to validate.
///
/// `ordinal_index` is the position of the originating [`ConnectionGroup`] in
/// the submitted list. It is carried through for reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub address: String,
    pub port: u16,
    #[serde(rename = "npname")]
    pub policy_name: String,
    #[serde(rename = "connectionidx")]
    pub ordinal_index: usize,
}

impl ConnectionTarget {
    pub fn new(
        address: impl Into<String>,
        port: u16,
        policy_name: impl Into<String>,
        ordinal_index: usize,
    ) -> Self {
        Self {
            address: address.into(),
            port,
            policy_name: policy_name.into(),
            ordinal_index,
        }
    }
}

impl std::fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.address.contains(':') && !self.address.starts_with('[') {
            write!(f, "[{}]:{}", self.address, self.port)
        } else {
            write!(f, "{}:{}", self.address, self.port)
        }
    }
}

/// The result of one probe attempt against one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target: ConnectionTarget,
    pub succeeded: bool,
    pub observed_at: DateTime<Utc>,
}

impl ProbeOutcome {
    /// Convert a successful outcome into its persisted form.
    pub fn into_record(self) -> Option<ResultRecord> {
        self.succeeded
            .then(|| ResultRecord::new(self.target, self.observed_at))
    }
}

/// A successful probe, as stored and served to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub address: String,
    pub port: u16,
    #[serde(rename = "connectionidx")]
    pub ordinal_index: usize,
    #[serde(rename = "npname")]
    pub policy_name: String,
    pub timestamp: DateTime<Utc>,
}

impl ResultRecord {
    pub fn new(target: ConnectionTarget, timestamp: DateTime<Utc>) -> Self {
        Self {
            address: target.address,
            port: target.port,
            ordinal_index: target.ordinal_index,
            policy_name: target.policy_name,
            timestamp,
        }
    }

    /// Whether this record was produced for `target`.
    pub fn matches(&self, target: &ConnectionTarget) -> bool {
        self.address == target.address
            && self.port == target.port
            && self.policy_name == target.policy_name
            && self.ordinal_index == target.ordinal_index
    }
}

/// Anything that can be handed to the batch tester: plain targets, or queue
/// entries that carry extra bookkeeping alongside the target.
pub trait AsTarget: Clone + Send + Sync + 'static {
    fn target(&self) -> &ConnectionTarget;
}

impl<T> AsTarget for T
where
    T: Borrow<ConnectionTarget> + Clone + Send + Sync + 'static,
{
    fn target(&self) -> &ConnectionTarget {
        self.borrow()
    }
}

/// Expand groups into targets: the cross product of each group's addresses
/// and ports, tagged with the group's position.
///
/// Rejects empty addresses, ports outside 1–65535, and empty policy names.
/// Groups with no addresses or no ports expand to nothing.
pub fn expand_groups(groups: &[ConnectionGroup]) -> ValidatorResult<Vec<ConnectionTarget>> {
    let mut targets = Vec::new();

    for (group_idx, group) in groups.iter().enumerate() {
        if group.policy_name.trim().is_empty() {
            return Err(ValidatorError::InvalidConnection {
                group: group_idx,
                reason: "policy name is empty".into(),
            });
        }

        let ports = group
            .ports
            .iter()
            .map(|&port| {
                u16::try_from(port)
                    .ok()
                    .filter(|p| *p != 0)
                    .ok_or_else(|| ValidatorError::InvalidConnection {
                        group: group_idx,
                        reason: format!("port {port} is out of range 1-65535"),
                    })
            })
            .collect::<ValidatorResult<Vec<u16>>>()?;

        for address in &group.addresses {
            let address = address.trim();
            if address.is_empty() {
                return Err(ValidatorError::InvalidConnection {
                    group: group_idx,
                    reason: "address is empty".into(),
                });
            }
            for &port in &ports {
                targets.push(ConnectionTarget::new(
                    address,
                    port,
                    group.policy_name.as_str(),
                    group_idx,
                ));
            }
        }
    }

    Ok(targets)
}

/// Parse a raw `/check` payload and expand it.
pub fn parse_groups(body: &[u8]) -> ValidatorResult<Vec<ConnectionTarget>> {
    let groups: Vec<ConnectionGroup> =
        serde_json::from_slice(body).map_err(|e| ValidatorError::MalformedPayload {
            reason: e.to_string(),
        })?;
    expand_groups(&groups)
}
