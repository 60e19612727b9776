//! # Configuration
//!
//! [`ValidatorConfig`] holds every knob of the validation engine and the
//! agent listener. All fields have defaults, so an agent with no config file
//! and no environment runs with the stock timings.
//!
//! ## Loading Priority
//!
//! 1. Explicit struct fields (programmatic construction)
//! 2. TOML config file at an explicit path
//! 3. `NETPOL_VALIDATOR_CONFIG` environment variable pointing at a file
//! 4. `./netpol-validator.toml` in the current directory
//! 5. `~/.config/netpol-validator/netpol-validator.toml`
//!
//! Environment variables (`PARALLEL_CONNECTIONS`,
//! `NETPOL_VALIDATOR_LISTEN_ADDR`, `NETPOL_VALIDATOR_PROBE_MODE`,
//! `NETPOL_VALIDATOR_DRAIN_MAX_ATTEMPTS`) override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ValidatorError, ValidatorResult};

/// Default agent listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9001";

/// Default worker-pool size for concurrent batches.
const DEFAULT_PARALLEL_CONNECTIONS: usize = 10;

/// Default per-probe timeout in milliseconds.
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1500;

/// Default probe attempts per target per batch round.
const DEFAULT_PROBE_ATTEMPTS: u32 = 1;

/// Default number of distinct policies sampled by the startup gate.
const DEFAULT_SAMPLE_POLICIES: usize = 3;

/// Default startup gate retry interval in milliseconds.
const DEFAULT_STARTUP_INTERVAL_MS: u64 = 100;

/// Default convergence polling tick in milliseconds.
const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Default convergence polling deadline in seconds.
const DEFAULT_CONVERGENCE_TIMEOUT_SECS: u64 = 10;

/// Default synchronous retry rounds after polling.
const DEFAULT_RETRY_ROUNDS: u32 = 3;

/// Default number of entries collected per drain cycle.
const DEFAULT_DRAIN_BATCH_SIZE: usize = 10;

/// Default pause between drain cycles in milliseconds.
const DEFAULT_DRAIN_INTERVAL_MS: u64 = 100;

/// Default max drain attempts (0 = unlimited).
const DEFAULT_DRAIN_MAX_ATTEMPTS: u32 = 0;

const CONFIG_FILE_NAME: &str = "netpol-validator.toml";

/// Configuration for the validation engine and the agent around it.
///
/// # Examples
///
/// ```
/// use netpol_validator::config::ValidatorConfig;
///
/// let mut config = ValidatorConfig::default();
/// config.parallel_connections = 20;
/// assert_eq!(config.effective_batch_size(), 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Address the agent HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Maximum number of batches probed concurrently. The failure drain uses
    /// a separate pool of the same size.
    #[serde(default = "default_parallel_connections")]
    pub parallel_connections: usize,

    /// Targets per batch. Falls back to `parallel_connections` when unset.
    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Probe settings.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Startup gate settings.
    #[serde(default)]
    pub startup: StartupConfig,

    /// Convergence loop settings.
    #[serde(default)]
    pub convergence: ConvergenceConfig,

    /// Failure drain settings.
    #[serde(default)]
    pub drain: DrainConfig,
}

/// How a single reachability check is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// `GET http://address:port/`, success on HTTP 200.
    Http,
    /// TCP handshake only.
    Tcp,
}

impl std::str::FromStr for ProbeMode {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ProbeMode::Http),
            "tcp" => Ok(ProbeMode::Tcp),
            other => Err(ValidatorError::ConfigError {
                reason: format!("unknown probe mode '{other}' (expected 'http' or 'tcp')"),
            }),
        }
    }
}

/// Probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Probe implementation.
    #[serde(default = "default_probe_mode")]
    pub mode: ProbeMode,

    /// Timeout for a single probe, in milliseconds.
    #[serde(default = "default_probe_timeout")]
    pub timeout_ms: u64,

    /// Probe attempts per target within one batch round.
    #[serde(default = "default_probe_attempts")]
    pub attempts: u32,
}

/// Startup gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Number of distinct policies sampled before the engine starts.
    #[serde(default = "default_sample_policies")]
    pub sample_policies: usize,

    /// Pause between unsuccessful sample rounds, in milliseconds.
    #[serde(default = "default_startup_interval")]
    pub interval_ms: u64,
}

/// Per-batch convergence loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceConfig {
    /// Polling tick, in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Polling deadline, in seconds.
    #[serde(default = "default_convergence_timeout")]
    pub timeout_secs: u64,

    /// Synchronous retry rounds run against the remaining failures.
    #[serde(default = "default_retry_rounds")]
    pub retry_rounds: u32,
}

/// Failure drain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainConfig {
    /// Maximum entries collected from the failure queue per cycle.
    #[serde(default = "default_drain_batch_size")]
    pub batch_size: usize,

    /// Pause between drain cycles, in milliseconds.
    #[serde(default = "default_drain_interval")]
    pub interval_ms: u64,

    /// Drain rounds a target may fail before it is retired as a permanent
    /// failure. 0 means unlimited.
    #[serde(default = "default_drain_max_attempts")]
    pub max_attempts: u32,
}

// ─── Defaults ───────────────────────────────────────────────────────────

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_parallel_connections() -> usize {
    DEFAULT_PARALLEL_CONNECTIONS
}

fn default_probe_mode() -> ProbeMode {
    ProbeMode::Http
}

fn default_probe_timeout() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

fn default_probe_attempts() -> u32 {
    DEFAULT_PROBE_ATTEMPTS
}

fn default_sample_policies() -> usize {
    DEFAULT_SAMPLE_POLICIES
}

fn default_startup_interval() -> u64 {
    DEFAULT_STARTUP_INTERVAL_MS
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_convergence_timeout() -> u64 {
    DEFAULT_CONVERGENCE_TIMEOUT_SECS
}

fn default_retry_rounds() -> u32 {
    DEFAULT_RETRY_ROUNDS
}

fn default_drain_batch_size() -> usize {
    DEFAULT_DRAIN_BATCH_SIZE
}

fn default_drain_interval() -> u64 {
    DEFAULT_DRAIN_INTERVAL_MS
}

fn default_drain_max_attempts() -> u32 {
    DEFAULT_DRAIN_MAX_ATTEMPTS
}

// ─── Default impls ──────────────────────────────────────────────────────

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            parallel_connections: DEFAULT_PARALLEL_CONNECTIONS,
            batch_size: None,
            probe: ProbeConfig::default(),
            startup: StartupConfig::default(),
            convergence: ConvergenceConfig::default(),
            drain: DrainConfig::default(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            mode: ProbeMode::Http,
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            attempts: DEFAULT_PROBE_ATTEMPTS,
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            sample_policies: DEFAULT_SAMPLE_POLICIES,
            interval_ms: DEFAULT_STARTUP_INTERVAL_MS,
        }
    }
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            timeout_secs: DEFAULT_CONVERGENCE_TIMEOUT_SECS,
            retry_rounds: DEFAULT_RETRY_ROUNDS,
        }
    }
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_DRAIN_BATCH_SIZE,
            interval_ms: DEFAULT_DRAIN_INTERVAL_MS,
            max_attempts: DEFAULT_DRAIN_MAX_ATTEMPTS,
        }
    }
}

// ─── Duration accessors ─────────────────────────────────────────────────

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl StartupConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl ConvergenceConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DrainConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

// ─── ValidatorConfig impl ───────────────────────────────────────────────

impl ValidatorConfig {
    /// Defaults plus environment variable overrides.
    pub fn from_env() -> ValidatorResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load config from a TOML file, with environment variable overrides.
    #[cfg(feature = "config-toml")]
    pub fn from_file(path: impl AsRef<Path>) -> ValidatorResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ValidatorError::ConfigError {
                reason: format!("Failed to read config file '{}': {}", path.display(), e),
            })?;
        let mut config: Self = toml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Discover and load config from the standard search path:
    ///
    /// 1. Explicit path (if `Some`)
    /// 2. `NETPOL_VALIDATOR_CONFIG` environment variable
    /// 3. `./netpol-validator.toml`
    /// 4. `~/.config/netpol-validator/netpol-validator.toml`
    ///
    /// Falls back to defaults plus environment overrides if no file is found.
    #[cfg(feature = "config-toml")]
    pub fn discover(explicit_path: Option<&Path>) -> ValidatorResult<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var("NETPOL_VALIDATOR_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        if let Some(config_path) = dirs_config_path() {
            if config_path.exists() {
                return Self::from_file(&config_path);
            }
        }

        Self::from_env()
    }

    /// Batch size used by the work distributor.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(self.parallel_connections)
    }

    /// Reject values the engine cannot run with (zero-sized pools or
    /// batches, zero intervals).
    pub fn validate(&self) -> ValidatorResult<()> {
        let checks: [(bool, &str); 9] = [
            (self.parallel_connections == 0, "parallel_connections must be at least 1"),
            (self.effective_batch_size() == 0, "batch_size must be at least 1"),
            (self.probe.timeout_ms == 0, "probe.timeout_ms must be greater than 0"),
            (self.probe.attempts == 0, "probe.attempts must be at least 1"),
            (self.startup.interval_ms == 0, "startup.interval_ms must be greater than 0"),
            (
                self.convergence.tick_interval_ms == 0,
                "convergence.tick_interval_ms must be greater than 0",
            ),
            (
                self.convergence.timeout_secs == 0,
                "convergence.timeout_secs must be greater than 0",
            ),
            (self.drain.batch_size == 0, "drain.batch_size must be at least 1"),
            (self.drain.interval_ms == 0, "drain.interval_ms must be greater than 0"),
        ];

        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, reason)) => Err(ValidatorError::ConfigError {
                reason: (*reason).to_string(),
            }),
            None => Ok(()),
        }
    }

    fn apply_env_overrides(&mut self) -> ValidatorResult<()> {
        if let Ok(value) = std::env::var("PARALLEL_CONNECTIONS") {
            self.parallel_connections = parse_env("PARALLEL_CONNECTIONS", &value)?;
        }
        if let Ok(addr) = std::env::var("NETPOL_VALIDATOR_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Ok(mode) = std::env::var("NETPOL_VALIDATOR_PROBE_MODE") {
            self.probe.mode = mode.parse()?;
        }
        if let Ok(value) = std::env::var("NETPOL_VALIDATOR_DRAIN_MAX_ATTEMPTS") {
            self.drain.max_attempts = parse_env("NETPOL_VALIDATOR_DRAIN_MAX_ATTEMPTS", &value)?;
        }
        Ok(())
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> ValidatorResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ValidatorError::ConfigError {
            reason: format!("failed to parse env {key}='{value}': {e}"),
        })
}

/// Platform-appropriate config directory path.
#[cfg(feature = "config-toml")]
fn dirs_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|dir| PathBuf::from(dir).join("netpol-validator").join(CONFIG_FILE_NAME))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(|dir| {
            PathBuf::from(dir)
                .join(".config")
                .join("netpol-validator")
                .join(CONFIG_FILE_NAME)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: [&str; 5] = [
        "PARALLEL_CONNECTIONS",
        "NETPOL_VALIDATOR_LISTEN_ADDR",
        "NETPOL_VALIDATOR_PROBE_MODE",
        "NETPOL_VALIDATOR_DRAIN_MAX_ATTEMPTS",
        "NETPOL_VALIDATOR_CONFIG",
    ];

    struct EnvGuard {
        saved: Vec<(&'static str, Option<OsString>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let saved = keys.iter().map(|k| (*k, std::env::var_os(k))).collect();
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                if let Some(value) = value {
                    set_env(key, value);
                } else {
                    remove_env(key);
                }
            }
        }
    }

    fn set_env(key: &str, value: impl AsRef<std::ffi::OsStr>) {
        // SAFETY: every test touching the environment holds ENV_LOCK.
        unsafe { std::env::set_var(key, value) };
    }

    fn remove_env(key: &str) {
        // SAFETY: every test touching the environment holds ENV_LOCK.
        unsafe { std::env::remove_var(key) };
    }

    fn clear_env() {
        for key in ENV_KEYS {
            remove_env(key);
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn unique_temp_dir(label: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "netpol-validator-config-tests-{}-{}-{}",
            label,
            std::process::id(),
            now
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.parallel_connections, 10);
        assert_eq!(config.effective_batch_size(), 10);
        assert_eq!(config.probe.mode, ProbeMode::Http);
        assert_eq!(config.probe.timeout(), Duration::from_millis(1500));
        assert_eq!(config.probe.attempts, 1);
        assert_eq!(config.startup.sample_policies, 3);
        assert_eq!(config.startup.interval(), Duration::from_millis(100));
        assert_eq!(config.convergence.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.convergence.timeout(), Duration::from_secs(10));
        assert_eq!(config.convergence.retry_rounds, 3);
        assert_eq!(config.drain.batch_size, 10);
        assert_eq!(config.drain.interval(), Duration::from_millis(100));
        assert_eq!(config.drain.max_attempts, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_batch_size_wins() {
        let config = ValidatorConfig {
            batch_size: Some(20),
            ..ValidatorConfig::default()
        };
        assert_eq!(config.effective_batch_size(), 20);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = ValidatorConfig::default();
        config.parallel_connections = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("parallel_connections"));

        let mut config = ValidatorConfig::default();
        config.convergence.tick_interval_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tick_interval_ms"));

        let mut config = ValidatorConfig::default();
        config.batch_size = Some(0);
        assert!(config.validate().is_err());

        let mut config = ValidatorConfig::default();
        config.drain.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probe_mode_from_str() {
        assert_eq!("http".parse::<ProbeMode>().unwrap(), ProbeMode::Http);
        assert_eq!(" TCP ".parse::<ProbeMode>().unwrap(), ProbeMode::Tcp);
        let err = "udp".parse::<ProbeMode>().unwrap_err();
        assert!(matches!(err, ValidatorError::ConfigError { .. }));
    }

    #[cfg(feature = "config-toml")]
    #[test]
    fn test_deserialize_toml() {
        let toml_str = r#"
            listen_addr = "127.0.0.1:9101"
            parallel_connections = 20
            batch_size = 40

            [probe]
            mode = "tcp"
            timeout_ms = 500

            [convergence]
            timeout_secs = 30

            [drain]
            max_attempts = 50
        "#;

        let config: ValidatorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9101");
        assert_eq!(config.parallel_connections, 20);
        assert_eq!(config.effective_batch_size(), 40);
        assert_eq!(config.probe.mode, ProbeMode::Tcp);
        assert_eq!(config.probe.timeout_ms, 500);
        assert_eq!(config.probe.attempts, 1);
        assert_eq!(config.convergence.timeout_secs, 30);
        assert_eq!(config.convergence.tick_interval_ms, 1000);
        assert_eq!(config.drain.max_attempts, 50);
        assert_eq!(config.drain.batch_size, 10);
    }

    #[test]
    fn test_from_env_applies_overrides() {
        let _lock = env_lock();
        let _env = EnvGuard::capture(&ENV_KEYS);
        clear_env();

        let config = ValidatorConfig::from_env().unwrap();
        assert_eq!(config.parallel_connections, 10);

        set_env("PARALLEL_CONNECTIONS", "25");
        set_env("NETPOL_VALIDATOR_LISTEN_ADDR", "127.0.0.1:7000");
        set_env("NETPOL_VALIDATOR_PROBE_MODE", "tcp");
        set_env("NETPOL_VALIDATOR_DRAIN_MAX_ATTEMPTS", "7");

        let config = ValidatorConfig::from_env().unwrap();
        assert_eq!(config.parallel_connections, 25);
        assert_eq!(config.listen_addr, "127.0.0.1:7000");
        assert_eq!(config.probe.mode, ProbeMode::Tcp);
        assert_eq!(config.drain.max_attempts, 7);
    }

    #[test]
    fn test_from_env_rejects_unparseable_parallelism() {
        let _lock = env_lock();
        let _env = EnvGuard::capture(&ENV_KEYS);
        clear_env();

        set_env("PARALLEL_CONNECTIONS", "lots");
        let err = ValidatorConfig::from_env().unwrap_err();
        assert!(matches!(err, ValidatorError::ConfigError { .. }));
        assert!(
            err.to_string().contains("PARALLEL_CONNECTIONS"),
            "unexpected error: {err}"
        );
    }

    #[cfg(feature = "config-toml")]
    #[test]
    fn test_from_file_env_overrides_precedence() {
        let _lock = env_lock();
        let _env = EnvGuard::capture(&ENV_KEYS);
        clear_env();

        let dir = unique_temp_dir("from-file-overrides");
        let config_path = dir.join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            r#"
listen_addr = "10.0.0.1:9001"
parallel_connections = 4
"#,
        )
        .unwrap();

        let from_file = ValidatorConfig::from_file(&config_path).unwrap();
        assert_eq!(from_file.parallel_connections, 4);

        set_env("PARALLEL_CONNECTIONS", "16");
        let overridden = ValidatorConfig::from_file(&config_path).unwrap();
        assert_eq!(overridden.parallel_connections, 16);
        assert_eq!(overridden.listen_addr, "10.0.0.1:9001");

        fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(feature = "config-toml")]
    #[test]
    fn test_discover_prefers_explicit_then_env_pointer() {
        let _lock = env_lock();
        let _env = EnvGuard::capture(&ENV_KEYS);
        clear_env();

        let dir = unique_temp_dir("discover");
        let explicit = dir.join("explicit.toml");
        let pointed = dir.join("pointed.toml");
        fs::write(&explicit, "parallel_connections = 2\n").unwrap();
        fs::write(&pointed, "parallel_connections = 3\n").unwrap();

        set_env("NETPOL_VALIDATOR_CONFIG", &pointed);

        let config = ValidatorConfig::discover(Some(&explicit)).unwrap();
        assert_eq!(config.parallel_connections, 2);

        let config = ValidatorConfig::discover(None).unwrap();
        assert_eq!(config.parallel_connections, 3);

        fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(feature = "config-toml")]
    #[test]
    fn test_from_file_missing_and_invalid_errors() {
        let _lock = env_lock();
        let dir = unique_temp_dir("from-file-errors");

        let missing = ValidatorConfig::from_file(dir.join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ValidatorError::ConfigError { .. }));
        assert!(
            missing.to_string().contains("Failed to read config file"),
            "unexpected error: {missing}"
        );

        let invalid_path = dir.join("invalid.toml");
        fs::write(&invalid_path, "parallel_connections = [").unwrap();
        let invalid = ValidatorConfig::from_file(&invalid_path).unwrap_err();
        assert!(matches!(invalid, ValidatorError::ConfigError { .. }));

        fs::remove_dir_all(dir).unwrap();
    }
}
