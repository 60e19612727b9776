//! # Error Types
//!
//! Errors surfaced by the validator. Network unreachability is deliberately
//! absent: a failed probe is an observation handled by retry, not an error.
//! What remains is setup (configuration, probe client, listener) and
//! malformed input rejected at the agent boundary.

use thiserror::Error;

/// Convenient Result alias for validator operations.
pub type ValidatorResult<T> = std::result::Result<T, ValidatorError>;

/// All errors that can occur while configuring or feeding the validator.
#[derive(Error, Debug)]
pub enum ValidatorError {
    // ─── Config ─────────────────────────────────────────────────────
    /// Configuration file error (missing, malformed, or invalid values).
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    // ─── Input ──────────────────────────────────────────────────────
    /// A submitted connection group could not be expanded into targets.
    #[error("Invalid connection group {group}: {reason}")]
    InvalidConnection { group: usize, reason: String },

    /// The connection payload was not valid JSON for the expected shape.
    #[error("Unable to parse request body: {reason}")]
    MalformedPayload { reason: String },

    // ─── Probe ──────────────────────────────────────────────────────
    /// The HTTP client used for probing could not be constructed.
    #[error("Probe client error: {0}")]
    ProbeClient(String),

    // ─── Server ─────────────────────────────────────────────────────
    /// The agent HTTP listener could not be bound.
    #[error("Failed to bind listener on {addr}: {reason}")]
    BindFailed { addr: String, reason: String },

    // ─── I/O ────────────────────────────────────────────────────────
    /// Filesystem or socket I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidatorError {
    /// Returns `true` if the error was caused by the caller's input and
    /// should be reported back as a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ValidatorError::InvalidConnection { .. } | ValidatorError::MalformedPayload { .. }
        )
    }
}

// ─── From impls for external error types ────────────────────────────────

impl From<reqwest::Error> for ValidatorError {
    fn from(err: reqwest::Error) -> Self {
        ValidatorError::ProbeClient(err.to_string())
    }
}

#[cfg(feature = "config-toml")]
impl From<toml::de::Error> for ValidatorError {
    fn from(err: toml::de::Error) -> Self {
        ValidatorError::ConfigError {
            reason: err.to_string(),
        }
    }
}
