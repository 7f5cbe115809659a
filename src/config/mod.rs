//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (--config / SIGWATCH_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no hot reload
//! - Environment wins over the file so container deployments need no file
//! - Any validation failure is fatal before the first cycle runs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ChainConfig, LogFormat, MessagingConfig, MonitorConfig, ObservabilityConfig, PollConfig,
    StartPolicy, ValidatorConfig,
};

/// A configuration that passes validation, for unit tests.
#[cfg(test)]
pub(crate) fn test_config() -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.chain.base_url = "http://localhost:1317".into();
    config.validator.watch_address = "ABCDEF0123".into();
    config.monitor.poll_interval_ms = 5000;
    config.messaging.account_sid = "AC1".into();
    config.messaging.auth_token = "token".into();
    config.messaging.from = "+15550001".into();
    config.messaging.to = "+15550002".into();
    config
}
