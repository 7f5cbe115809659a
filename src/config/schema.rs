//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the signing monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Chain-data REST API settings.
    pub chain: ChainConfig,

    /// The validator being watched.
    pub validator: ValidatorConfig,

    /// Poll loop and alert timing.
    pub monitor: PollConfig,

    /// Outbound SMS provider settings.
    pub messaging: MessagingConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Chain-data API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Base URL of the REST API (e.g., "http://localhost:1317").
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_secs: 10,
        }
    }
}

/// Watched validator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Validator address as it appears in commit signatures (exact match).
    pub watch_address: String,
}

/// Where the first cycle starts when nothing has been scanned yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartPolicy {
    /// Begin at the current chain tip, no backfill.
    #[default]
    Tip,
    /// Begin at an explicit height.
    Height(u64),
}

/// Poll loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between the end of one cycle and the start of the next.
    pub poll_interval_ms: u64,

    /// Minimum seconds between two "missing" alerts.
    pub debounce_secs: u64,

    /// Cold start behaviour.
    pub start: StartPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 0,
            debounce_secs: 60 * 60,
            start: StartPolicy::Tip,
        }
    }
}

/// SMS provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Provider API root. Overridable for staging or tests.
    pub api_base_url: String,

    /// Account SID.
    pub account_sid: String,

    /// Auth token. Never logged.
    pub auth_token: String,

    /// Sender number.
    pub from: String,

    /// Recipient number.
    pub to: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.twilio.com".to_string(),
            account_sid: String::new(),
            auth_token: String::new(),
            from: String::new(),
            to: String::new(),
            request_timeout_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Prometheus scrape address (e.g., "0.0.0.0:9100"). Disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "sigwatch=info".to_string(),
            log_format: LogFormat::Full,
            metrics_address: None,
        }
    }
}
