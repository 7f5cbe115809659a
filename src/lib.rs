//! Validator signing monitor library.

pub mod alerting;
pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod monitor;
pub mod observability;

pub use config::schema::MonitorConfig;
pub use lifecycle::Shutdown;
pub use monitor::SigningMonitor;
