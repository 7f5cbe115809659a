//! Validator signing monitor.
//!
//! Polls a node's REST API for new blocks, checks each block's last commit
//! for the watched validator's signature, and sends an SMS when the
//! validator stops signing (and again when it recovers).
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────┐
//!   │                         SIGWATCH                          │
//!   │                                                           │
//!   │  ┌────────────┐   ┌──────────────┐   ┌────────────────┐   │
//!   │  │ blockchain │──▶│   monitor    │──▶│   alerting     │──┼──▶ SMS
//!   │  │ REST client│   │ scanner +    │   │ Twilio client  │   │
//!   │  └─────▲──────┘   │ state machine│   └────────────────┘   │
//!   │        │          └──────────────┘                        │
//!   │   Node REST API                                           │
//!   │                                                           │
//!   │  config · observability · lifecycle (cross-cutting)       │
//!   └───────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use sigwatch::config::load_config;
use sigwatch::lifecycle::{build_monitor, signals, Shutdown};
use sigwatch::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "sigwatch")]
#[command(about = "Alert when a validator stops signing blocks", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "SIGWATCH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("sigwatch v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(addr) = &config.observability.metrics_address {
        // Validation already checked the address.
        if let Ok(addr) = addr.parse::<SocketAddr>() {
            metrics::init_metrics(addr);
        }
    }

    let monitor = build_monitor(&config)?;

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(monitor.run(shutdown.subscribe()));

    signals::wait_for_shutdown_signal().await;
    if shutdown.trigger() == 0 {
        tracing::warn!("Monitor loop had already exited");
    }
    handle.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
