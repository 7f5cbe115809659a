//! Chain-data integration subsystem.
//!
//! # Data Flow
//! ```text
//! Node REST API
//!     GET /blocks/latest      → client.rs → Block
//!     GET /blocks/{height}    → client.rs → Found(Block) | NotFound
//!     → types.rs (serde model, commit signature lookup)
//! ```
//!
//! # Constraints
//! - Every request has a deadline (`chain.request_timeout_secs`)
//! - 404 on a height lookup is an expected outcome, not an error
//! - No retries; the monitor loop retries on its next tick

pub mod client;
pub mod types;

pub use client::{BlockSource, HttpBlockSource};
pub use types::{Block, BlockHeight, ChainConfig, ChainError, ChainResult, FetchOutcome};
