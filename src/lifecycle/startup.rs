//! Startup orchestration.
//!
//! Builds the collaborators from a validated config. Any failure here is
//! fatal; the process never starts polling with a half-built monitor.

use thiserror::Error;

use crate::alerting::{AlertError, TwilioNotifier};
use crate::blockchain::{ChainError, HttpBlockSource};
use crate::config::MonitorConfig;
use crate::monitor::SigningMonitor;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create block source: {0}")]
    BlockSource(#[from] ChainError),

    #[error("failed to create notifier: {0}")]
    Notifier(#[from] AlertError),
}

/// The production monitor: REST block source and SMS notifier.
pub type HttpMonitor = SigningMonitor<HttpBlockSource, TwilioNotifier>;

pub fn build_monitor(config: &MonitorConfig) -> Result<HttpMonitor, StartupError> {
    let source = HttpBlockSource::new(&config.chain)?;
    let notifier = TwilioNotifier::new(&config.messaging)?;

    tracing::info!(
        base_url = %source.base_url(),
        validator = %config.validator.watch_address,
        poll_interval_ms = config.monitor.poll_interval_ms,
        debounce_secs = config.monitor.debounce_secs,
        start = ?config.monitor.start,
        "Monitor initialized"
    );

    Ok(SigningMonitor::new(source, notifier, config))
}
