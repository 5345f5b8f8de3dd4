//! Runtime configuration for ride sessions and the demo driver.
//!
//! Values come from environment variables with defaults for every field:
//!
//! | Variable                   | Default                                                          |
//! |----------------------------|------------------------------------------------------------------|
//! | `RIDE_DELAY_WATCH_MS`      | 2000                                                             |
//! | `RIDE_DEMO_GRACE_MS`       | 3000                                                             |
//! | `RIDE_SHUTDOWN_TIMEOUT_MS` | 5000                                                             |
//! | `RIDE_BROADCAST_CAPACITY`  | 16                                                               |
//! | `RIDE_LOG`                 | `ride_lifecycle=info,ride_order=info,ride_lifecycle_runtime=info` |
//!
//! # Example
//!
//! ```no_run
//! use ride_order::config::RideConfig;
//!
//! # fn main() -> Result<(), ride_order::error::ConfigError> {
//! let config = RideConfig::from_env()?;
//! println!("watcher waits {:?}", config.delay_watch_after);
//! # Ok(())
//! # }
//! ```

use crate::error::ConfigError;
use ride_lifecycle_runtime::StoreConfig;
use std::str::FromStr;
use std::time::Duration;

const DELAY_WATCH_VAR: &str = "RIDE_DELAY_WATCH_MS";
const DEMO_GRACE_VAR: &str = "RIDE_DEMO_GRACE_MS";
const SHUTDOWN_TIMEOUT_VAR: &str = "RIDE_SHUTDOWN_TIMEOUT_MS";
const BROADCAST_CAPACITY_VAR: &str = "RIDE_BROADCAST_CAPACITY";
const LOG_VAR: &str = "RIDE_LOG";

/// Default log filter when neither `RUST_LOG` nor `RIDE_LOG` is set
pub const DEFAULT_LOG_FILTER: &str =
    "ride_lifecycle=info,ride_order=info,ride_lifecycle_runtime=info";

/// Ride lifecycle configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideConfig {
    /// How long the delay watcher waits before raising `CarDelayed`
    pub delay_watch_after: Duration,
    /// How long the demo waits for a pending watcher
    pub demo_grace: Duration,
    /// Store shutdown timeout
    pub shutdown_timeout: Duration,
    /// Capacity of the store's action broadcast
    pub broadcast_capacity: usize,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for RideConfig {
    fn default() -> Self {
        Self {
            delay_watch_after: Duration::from_secs(2),
            demo_grace: Duration::from_secs(3),
            shutdown_timeout: Duration::from_secs(5),
            broadcast_capacity: 16,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RideConfig {
    /// Load from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the
    /// resulting configuration fails [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the
    /// resulting configuration fails [`validate`](Self::validate).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64>(&lookup, DELAY_WATCH_VAR)? {
            config.delay_watch_after = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, DEMO_GRACE_VAR)? {
            config.demo_grace = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, SHUTDOWN_TIMEOUT_VAR)? {
            config.shutdown_timeout = Duration::from_millis(ms);
        }
        if let Some(capacity) = parse_var::<usize>(&lookup, BROADCAST_CAPACITY_VAR)? {
            config.broadcast_capacity = capacity;
        }
        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the delay watcher wait
    #[must_use]
    pub const fn with_delay_watch_after(mut self, after: Duration) -> Self {
        self.delay_watch_after = after;
        self
    }

    /// Set the demo grace period
    #[must_use]
    pub const fn with_demo_grace(mut self, grace: Duration) -> Self {
        self.demo_grace = grace;
        self
    }

    /// Set the store shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_watch_after.is_zero() {
            return Err(ConfigError::Validation(format!("{DELAY_WATCH_VAR} must be > 0")));
        }
        if self.demo_grace <= self.delay_watch_after {
            return Err(ConfigError::Validation(format!(
                "{DEMO_GRACE_VAR} ({:?}) must exceed {DELAY_WATCH_VAR} ({:?})",
                self.demo_grace, self.delay_watch_after
            )));
        }
        if self.shutdown_timeout.is_zero() {
            return Err(ConfigError::Validation(format!("{SHUTDOWN_TIMEOUT_VAR} must be > 0")));
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Validation(format!(
                "{BROADCAST_CAPACITY_VAR} must be > 0"
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{LOG_VAR} cannot be empty")));
        }
        Ok(())
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_broadcast_capacity(self.broadcast_capacity)
            .with_shutdown_timeout(self.shutdown_timeout)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
