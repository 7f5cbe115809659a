//! Outbound alerting subsystem.
//!
//! # Data Flow
//! ```text
//! monitor::state (decides an Alert is due)
//!     → notifier.rs (Notifier trait, message bodies)
//!     → twilio.rs (SMS over the provider's REST API)
//! ```
//!
//! # Constraints
//! - Auth token is never logged
//! - One attempt per alert; failure surfaces to the cycle
//! - Every send has a deadline

pub mod notifier;
pub mod twilio;

pub use notifier::{Alert, AlertError, AlertKind, Notifier};
pub use twilio::TwilioNotifier;
