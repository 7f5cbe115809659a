//! Signing state machine.
//!
//! # States
//! - Signing: validator's signature seen in the latest scan
//! - NotSigning: at least one recent block lacked it
//!
//! # State Transitions
//! ```text
//! Signing → NotSigning:  Gap outcome. "missing" alert only if the debounce
//!                        window has passed since the last one.
//! NotSigning → Signing:  Clean outcome, once the "recovered" alert is sent.
//! ```
//!
//! A sustained outage alerts once; repeated gaps while NotSigning are silent.

use std::time::{Duration, Instant};

use crate::alerting::{Alert, AlertKind};
use crate::monitor::scanner::ScanOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningState {
    #[default]
    Signing,
    NotSigning,
}

impl SigningState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningState::Signing => "signing",
            SigningState::NotSigning => "not_signing",
        }
    }
}

/// Current signing state plus the debounce clock.
#[derive(Debug, Clone)]
pub struct SigningTracker {
    state: SigningState,
    /// `None` until the first missing alert is delivered.
    last_missing_alert: Option<Instant>,
    debounce: Duration,
}

impl SigningTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: SigningState::Signing,
            last_missing_alert: None,
            debounce,
        }
    }

    pub fn state(&self) -> SigningState {
        self.state
    }

    pub fn last_missing_alert(&self) -> Option<Instant> {
        self.last_missing_alert
    }

    fn debounce_elapsed(&self, now: Instant) -> bool {
        match self.last_missing_alert {
            Some(last) => now.saturating_duration_since(last) > self.debounce,
            None => true,
        }
    }

    /// Apply a scan outcome and return the alert to send, if any.
    ///
    /// The Signing → NotSigning transition happens here. The reverse waits
    /// for [`record_alert_sent`](Self::record_alert_sent).
    pub fn evaluate(&mut self, outcome: ScanOutcome, now: Instant) -> Option<Alert> {
        match (outcome, self.state) {
            (ScanOutcome::Gap(height), SigningState::Signing) => {
                tracing::warn!(height, "Transitioning from signing to not signing");
                self.state = SigningState::NotSigning;
                if self.debounce_elapsed(now) {
                    Some(Alert::missing(height))
                } else {
                    tracing::info!(height, "Missing alert suppressed by debounce window");
                    None
                }
            }
            (ScanOutcome::Gap(height), SigningState::NotSigning) => {
                tracing::debug!(height, "Still not signing");
                None
            }
            (ScanOutcome::Clean(height), SigningState::NotSigning) => Some(Alert::recovered(height)),
            (ScanOutcome::Clean(_), SigningState::Signing) => None,
        }
    }

    /// Note that `alert` was delivered at `now`.
    pub fn record_alert_sent(&mut self, alert: &Alert, now: Instant) {
        match alert.kind {
            AlertKind::Missing => self.last_missing_alert = Some(now),
            AlertKind::Recovered => {
                tracing::info!(height = alert.height, "Validator signing again");
                self.state = SigningState::Signing;
            }
        }
    }
}
