//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! scanner / state machine / alerting produce:
//!     → logging.rs (structured tracing events, one span per cycle)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout/stderr (log shipping is the deployment's job)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
