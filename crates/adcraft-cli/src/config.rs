//! Environment configuration.
//!
//! Read once at startup. Parsing goes through a lookup function so tests can
//! supply variables without touching the process environment.

use std::time::Duration;

use crate::error::AppError;

/// Per-call collaborator timeout, in milliseconds. `0` disables it.
pub const CALL_TIMEOUT_VAR: &str = "ADCRAFT_CALL_TIMEOUT_MS";
/// Whether the simulated platform injects random failures.
pub const SIMULATE_FAILURES_VAR: &str = "ADCRAFT_SIMULATE_FAILURES";
/// Fixed seed for the simulated platform's RNG.
pub const RNG_SEED_VAR: &str = "ADCRAFT_RNG_SEED";
/// Final report format.
pub const OUTPUT_VAR: &str = "ADCRAFT_OUTPUT";
/// Log line format.
pub const LOG_FORMAT_VAR: &str = "ADCRAFT_LOG_FORMAT";

const DEFAULT_CALL_TIMEOUT_MS: u64 = 5000;

/// Text or JSON rendering, used for both the report and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable lines.
    Text,
    /// One JSON document.
    Json,
}

/// Runtime configuration for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Collaborator call timeout; `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
    /// Inject random failures into the simulated platform.
    pub simulate_failures: bool,
    /// Seed for the simulated platform's RNG; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// Format of the final report on stdout.
    pub output: Format,
    /// Format of log lines on stderr.
    pub log_format: Format,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            call_timeout: Some(Duration::from_millis(DEFAULT_CALL_TIMEOUT_MS)),
            simulate_failures: true,
            rng_seed: None,
            output: Format::Text,
            log_format: Format::Text,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first invalid variable.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first invalid variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(CALL_TIMEOUT_VAR) {
            let millis: u64 = raw.trim().parse().map_err(|e| {
                AppError::Config(format!("{CALL_TIMEOUT_VAR} must be a whole number of milliseconds: {e}"))
            })?;
            config.call_timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }

        if let Some(raw) = lookup(SIMULATE_FAILURES_VAR) {
            config.simulate_failures = parse_bool(SIMULATE_FAILURES_VAR, &raw)?;
        }

        if let Some(raw) = lookup(RNG_SEED_VAR) {
            let seed = raw.trim().parse().map_err(|e| {
                AppError::Config(format!("{RNG_SEED_VAR} must be an unsigned 64-bit integer: {e}"))
            })?;
            config.rng_seed = Some(seed);
        }

        if let Some(raw) = lookup(OUTPUT_VAR) {
            config.output = parse_format(OUTPUT_VAR, &raw)?;
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = parse_format(LOG_FORMAT_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{name} must be true or false, got {other:?}"
        ))),
    }
}

fn parse_format(name: &str, raw: &str) -> Result<Format, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(AppError::Config(format!(
            "{name} must be `text` or `json`, got {other:?}"
        ))),
    }
}
