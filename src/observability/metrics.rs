//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sigwatch_blocks_scanned_total` (counter)
//! - `sigwatch_missed_signatures_total` (counter): blocks without the watched signature
//! - `sigwatch_fetch_errors_total` (counter): failed block requests
//! - `sigwatch_cycle_errors_total{kind}` (counter): cycles aborted, by `chain` / `alert`
//! - `sigwatch_alerts_sent_total{kind}` (counter): `missing` / `recovered`
//! - `sigwatch_signing_state` (gauge): 1=signing, 0=not signing
//! - `sigwatch_last_height` (gauge): scan cursor
//!
//! Recording is a no-op until a recorder is installed, so library code and
//! tests can call these freely.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_blocks_scanned(count: u64) {
    ::metrics::counter!("sigwatch_blocks_scanned_total").increment(count);
}

pub fn record_missed_signatures(count: u64) {
    ::metrics::counter!("sigwatch_missed_signatures_total").increment(count);
}

pub fn record_fetch_error() {
    ::metrics::counter!("sigwatch_fetch_errors_total").increment(1);
}

pub fn record_cycle_error(kind: &'static str) {
    ::metrics::counter!("sigwatch_cycle_errors_total", "kind" => kind).increment(1);
}

pub fn record_alert_sent(kind: &'static str) {
    ::metrics::counter!("sigwatch_alerts_sent_total", "kind" => kind).increment(1);
}

pub fn record_signing_state(signing: bool) {
    ::metrics::gauge!("sigwatch_signing_state").set(if signing { 1.0 } else { 0.0 });
}

pub fn record_last_height(height: u64) {
    ::metrics::gauge!("sigwatch_last_height").set(height as f64);
}
