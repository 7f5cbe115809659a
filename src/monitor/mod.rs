//! Validator signing monitor.
//!
//! # Data Flow
//! ```text
//! every poll_interval_ms (fixed delay after each cycle):
//!     service.rs
//!     → scanner.rs  (cursor+1 ..= first NotFound, via BlockSource)
//!     → ScanOutcome: Gap(last unsigned height) | Clean(last height)
//!     → cursor committed
//!     → state.rs    (Signing ↔ NotSigning, debounce)
//!     → Notifier    (at most one alert per cycle)
//! ```
//!
//! # Design Decisions
//! - One cycle at a time; all state is owned by `SigningMonitor`, no locks
//! - Any error ends the cycle; the loop logs it and schedules the next one
//! - Cold start follows `StartPolicy` (chain tip by default, no backfill)

pub mod scanner;
pub mod service;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use scanner::{ScanCursor, ScanOutcome, ScanReport, Scanner};
pub use service::{CycleError, CycleSummary, MonitorState, SigningMonitor};
pub use state::{SigningState, SigningTracker};
