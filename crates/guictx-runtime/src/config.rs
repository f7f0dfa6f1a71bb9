//! Context configuration
//!
//! Compile-time defaults with runtime environment overrides.
//!
//! ```rust,ignore
//! use guictx_runtime::ContextConfig;
//! use std::time::Duration;
//!
//! // Defaults plus any GUICTX_* overrides
//! let config = ContextConfig::from_env();
//!
//! // Or customize programmatically
//! let config = ContextConfig::default()
//!     .tasks_interval(Duration::from_millis(10))
//!     .isolate_task_panics(false);
//! ```

use std::time::Duration;

use guictx_core::constants::{
    DEFAULT_TASKS_INTERVAL_MS, DEFAULT_WINDOWS_INTERVAL_MS, DEFAULT_WORKER_PREFIX,
};
use guictx_core::env::{env_get, env_get_bool, env_get_str};

/// Configuration for a Context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Period of the task-queue drain handler
    pub tasks_interval: Duration,
    /// Period of the surface liveness handler
    pub windows_interval: Duration,
    /// Catch a panicking task and keep draining the batch
    pub isolate_task_panics: bool,
    /// Worker threads are named `<prefix>-<n>`
    pub worker_prefix: String,
    /// Log every drain and liveness tick
    pub debug_logging: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            tasks_interval: Duration::from_millis(DEFAULT_TASKS_INTERVAL_MS),
            windows_interval: Duration::from_millis(DEFAULT_WINDOWS_INTERVAL_MS),
            isolate_task_panics: true,
            worker_prefix: DEFAULT_WORKER_PREFIX.to_owned(),
            debug_logging: false,
        }
    }
}

impl ContextConfig {
    /// Defaults with environment overrides applied
    ///
    /// Environment variables (all optional):
    /// - `GUICTX_TASKS_INTERVAL_MS` - drain period
    /// - `GUICTX_WINDOWS_INTERVAL_MS` - liveness period
    /// - `GUICTX_ISOLATE_PANICS` - isolate task panics (0/1)
    /// - `GUICTX_WORKER_PREFIX` - worker thread name prefix
    /// - `GUICTX_DEBUG` - per-tick logging (0/1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            tasks_interval: Duration::from_millis(env_get(
                "GUICTX_TASKS_INTERVAL_MS",
                DEFAULT_TASKS_INTERVAL_MS,
            )),
            windows_interval: Duration::from_millis(env_get(
                "GUICTX_WINDOWS_INTERVAL_MS",
                DEFAULT_WINDOWS_INTERVAL_MS,
            )),
            isolate_task_panics: env_get_bool("GUICTX_ISOLATE_PANICS", defaults.isolate_task_panics),
            worker_prefix: env_get_str("GUICTX_WORKER_PREFIX", &defaults.worker_prefix),
            debug_logging: env_get_bool("GUICTX_DEBUG", defaults.debug_logging),
        }
    }

    /// Set the drain handler period
    pub fn tasks_interval(mut self, d: Duration) -> Self {
        self.tasks_interval = d;
        self
    }

    /// Set the liveness handler period
    pub fn windows_interval(mut self, d: Duration) -> Self {
        self.windows_interval = d;
        self
    }

    /// Choose whether a panicking task aborts the rest of its batch
    pub fn isolate_task_panics(mut self, isolate: bool) -> Self {
        self.isolate_task_panics = isolate;
        self
    }

    /// Set the worker thread name prefix
    pub fn worker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.worker_prefix = prefix.into();
        self
    }

    /// Enable per-tick debug logging
    pub fn debug_logging(mut self, enable: bool) -> Self {
        self.debug_logging = enable;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.tasks_interval.is_zero() {
            return Err("tasks_interval must be non-zero");
        }
        if self.windows_interval.is_zero() {
            return Err("windows_interval must be non-zero");
        }
        if self.worker_prefix.trim().is_empty() {
            return Err("worker_prefix must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContextConfig::default();
        assert_eq!(config.tasks_interval, Duration::from_millis(50));
        assert_eq!(config.windows_interval, Duration::from_millis(300));
        assert!(config.isolate_task_panics);
        assert_eq!(config.worker_prefix, "guictx-worker");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ContextConfig::default()
            .tasks_interval(Duration::from_millis(5))
            .windows_interval(Duration::from_millis(20))
            .isolate_task_panics(false)
            .worker_prefix("bg")
            .debug_logging(true);

        assert_eq!(config.tasks_interval, Duration::from_millis(5));
        assert_eq!(config.windows_interval, Duration::from_millis(20));
        assert!(!config.isolate_task_panics);
        assert_eq!(config.worker_prefix, "bg");
        assert!(config.debug_logging);
    }

    #[test]
    fn test_validate_rejects_zero_intervals() {
        let config = ContextConfig::default().tasks_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err("tasks_interval must be non-zero"));

        let config = ContextConfig::default().windows_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err("windows_interval must be non-zero"));
    }

    #[test]
    fn test_validate_rejects_blank_prefix() {
        let config = ContextConfig::default().worker_prefix("  ");
        assert_eq!(config.validate(), Err("worker_prefix must not be empty"));
    }
}
