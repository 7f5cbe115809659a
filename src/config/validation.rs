//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required values present (everything the monitor cannot run without)
//! - Validate value ranges (intervals and timeouts > 0, URLs parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is not a valid URL: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("{0} must not have leading or trailing whitespace")]
    Padded(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "chain.base_url", &config.chain.base_url);
    if config.chain.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("chain.request_timeout_secs"));
    }

    let watch_address = &config.validator.watch_address;
    if watch_address.trim().is_empty() {
        errors.push(ValidationError::Missing("validator.watch_address"));
    } else if watch_address.trim() != watch_address {
        // Addresses are matched exactly against commit signatures.
        errors.push(ValidationError::Padded("validator.watch_address"));
    }

    if config.monitor.poll_interval_ms == 0 {
        errors.push(ValidationError::Zero("monitor.poll_interval_ms"));
    }
    if config.monitor.debounce_secs == 0 {
        errors.push(ValidationError::Zero("monitor.debounce_secs"));
    }

    let messaging = &config.messaging;
    check_url(&mut errors, "messaging.api_base_url", &messaging.api_base_url);
    for (field, value) in [
        ("messaging.account_sid", &messaging.account_sid),
        ("messaging.auth_token", &messaging.auth_token),
        ("messaging.from", &messaging.from),
        ("messaging.to", &messaging.to),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Missing(field));
        }
    }
    if messaging.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("messaging.request_timeout_secs"));
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Missing(field));
        return;
    }
    if let Err(e) = url::Url::parse(value) {
        errors.push(ValidationError::InvalidUrl {
            field,
            reason: e.to_string(),
        });
    }
}
