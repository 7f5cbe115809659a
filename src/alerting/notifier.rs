//! Alert types and the notifier seam.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::BlockHeight;

/// What an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Validator stopped signing.
    Missing,
    /// Validator is signing again.
    Recovered,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Missing => "missing",
            AlertKind::Recovered => "recovered",
        }
    }
}

/// A single notification to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub height: BlockHeight,
}

impl Alert {
    pub fn missing(height: BlockHeight) -> Self {
        Self { kind: AlertKind::Missing, height }
    }

    pub fn recovered(height: BlockHeight) -> Self {
        Self { kind: AlertKind::Recovered, height }
    }

    /// Message text sent to the operator.
    pub fn body(&self) -> String {
        match self.kind {
            AlertKind::Missing => format!("Validator Missing Blocks! Height = {}", self.height),
            AlertKind::Recovered => {
                format!("Recovered: Validator is signing as of height {}", self.height)
            }
        }
    }
}

/// Errors from delivering an alert.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("alert request timed out after {0} seconds")]
    Timeout(u64),

    #[error("provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Delivers alerts to the operator.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_alert(&self, alert: &Alert) -> Result<(), AlertError>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    async fn send_alert(&self, alert: &Alert) -> Result<(), AlertError> {
        (**self).send_alert(alert).await
    }
}
