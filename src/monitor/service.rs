//! Monitoring loop: scan, evaluate, notify, sleep, repeat.

use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::Instrument;

use crate::alerting::{Alert, AlertError, Notifier};
use crate::blockchain::{BlockSource, ChainError};
use crate::config::MonitorConfig;
use crate::monitor::scanner::{ScanCursor, ScanReport, Scanner};
use crate::monitor::state::{SigningState, SigningTracker};
use crate::observability::metrics;

/// Why a cycle ended early.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("block fetch failed: {0}")]
    Chain(#[from] ChainError),

    #[error("alert delivery failed: {0}")]
    Alert(#[from] AlertError),
}

impl CycleError {
    /// Metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::Chain(_) => "chain",
            CycleError::Alert(_) => "alert",
        }
    }
}

/// Everything that survives from one cycle to the next.
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub cursor: ScanCursor,
    pub tracker: SigningTracker,
}

impl MonitorState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            cursor: ScanCursor::default(),
            tracker: SigningTracker::new(debounce),
        }
    }
}

/// What a successful cycle did.
#[derive(Debug, Clone)]
pub struct CycleSummary {
    pub report: ScanReport,
    pub alert: Option<Alert>,
    pub state: SigningState,
}

/// Owns the monitor state and drives cycles one at a time.
pub struct SigningMonitor<S, N> {
    source: S,
    notifier: N,
    scanner: Scanner,
    state: MonitorState,
    poll_interval: Duration,
    cycles: u64,
}

impl<S, N> SigningMonitor<S, N>
where
    S: BlockSource,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, config: &MonitorConfig) -> Self {
        Self {
            source,
            notifier,
            scanner: Scanner::new(config.validator.watch_address.clone(), config.monitor.start),
            state: MonitorState::new(Duration::from_secs(config.monitor.debounce_secs)),
            poll_interval: Duration::from_millis(config.monitor.poll_interval_ms),
            cycles: 0,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run one cycle now.
    pub async fn run_cycle(&mut self) -> Result<CycleSummary, CycleError> {
        self.run_cycle_at(Instant::now()).await
    }

    /// Run one cycle, using `now` for debounce decisions.
    ///
    /// A fetch error leaves all state untouched. Once the scan completes the
    /// cursor is committed, so an alert failure does not cause a rescan.
    pub async fn run_cycle_at(&mut self, now: Instant) -> Result<CycleSummary, CycleError> {
        let report = self.scanner.scan(&self.source, self.state.cursor).await?;

        self.state.cursor.advance_to(report.last_height);
        metrics::record_blocks_scanned(report.blocks_scanned);
        metrics::record_missed_signatures(report.missed);
        metrics::record_last_height(self.state.cursor.height());

        let alert = self.state.tracker.evaluate(report.outcome, now);
        if let Some(alert) = &alert {
            self.notifier.send_alert(alert).await?;
            self.state.tracker.record_alert_sent(alert, now);
            metrics::record_alert_sent(alert.kind.as_str());
        }

        Ok(CycleSummary {
            report,
            alert,
            state: self.state.tracker.state(),
        })
    }

    /// Loop until `shutdown` fires. Errors are logged and the next cycle is
    /// still scheduled; shutdown is only observed between cycles.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            validator = %self.scanner.watch_address(),
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Starting monitoring of validator"
        );

        loop {
            self.cycles += 1;
            let span = tracing::info_span!("cycle", n = self.cycles);

            match self.run_cycle().instrument(span).await {
                Ok(summary) => {
                    tracing::debug!(
                        cursor = self.state.cursor.height(),
                        scanned = summary.report.blocks_scanned,
                        state = summary.state.as_str(),
                        "Cycle complete"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        cursor = self.state.cursor.height(),
                        "Error monitoring"
                    );
                    metrics::record_cycle_error(e.kind());
                }
            }
            metrics::record_signing_state(self.state.tracker.state() == SigningState::Signing);

            tokio::select! {
                _ = sleep(self.poll_interval) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
