// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for tinyport
//!
//! This module provides metrics for monitoring TinyDNS imports:
//! - Populate pass metrics (count, duration, result)
//! - Line classification outcomes
//! - Records added and sink rejections

use lazy_static::lazy_static;
use prometheus::{
    opts, register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec,
    TextEncoder,
};

lazy_static! {
    /// Populate passes by zone mode and result
    pub static ref POPULATE_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "tinyport_populate_total",
            "Total number of populate passes"
        ),
        &["mode", "result"]
    )
    .expect("Failed to create POPULATE_TOTAL metric");

    /// Populate pass duration histogram
    pub static ref POPULATE_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "tinyport_populate_duration_seconds",
        "Populate pass duration in seconds",
        &["mode"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("Failed to create POPULATE_DURATION_SECONDS metric");

    /// Records accepted by the zone sink
    pub static ref RECORDS_ADDED_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "tinyport_records_added_total",
            "Total number of records added to zones"
        ),
        &["mode"]
    )
    .expect("Failed to create RECORDS_ADDED_TOTAL metric");

    /// Raw lines by classification outcome
    pub static ref LINES_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "tinyport_lines_total",
            "Total number of TinyDNS lines processed"
        ),
        &["mode", "outcome"]
    )
    .expect("Failed to create LINES_TOTAL metric");

    /// Sink rejections by reason
    pub static ref SINK_REJECTIONS_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "tinyport_sink_rejections_total",
            "Total number of records rejected by the zone sink"
        ),
        &["reason"]
    )
    .expect("Failed to create SINK_REJECTIONS_TOTAL metric");

    /// Application info metric
    pub static ref APP_INFO: CounterVec = register_counter_vec!(
        opts!(
            "tinyport_app_info",
            "Application information"
        ),
        &["version"]
    )
    .expect("Failed to create APP_INFO metric");
}

/// Initialize metrics with application info
pub fn init_metrics() {
    APP_INFO
        .with_label_values(&[env!("CARGO_PKG_VERSION")])
        .inc();
}

/// Generate metrics output in Prometheus format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a finished populate pass
pub fn record_populate(mode: &str, success: bool, added: usize, duration: f64) {
    let result = if success { "success" } else { "error" };
    POPULATE_TOTAL.with_label_values(&[mode, result]).inc();
    POPULATE_DURATION_SECONDS
        .with_label_values(&[mode])
        .observe(duration);
    RECORDS_ADDED_TOTAL
        .with_label_values(&[mode])
        .inc_by(added as f64);
}

/// Record the outcome of one raw line
pub fn record_line(mode: &str, outcome: &str) {
    LINES_TOTAL.with_label_values(&[mode, outcome]).inc();
}

/// Record a sink rejection
pub fn record_rejection(reason: &str) {
    SINK_REJECTIONS_TOTAL.with_label_values(&[reason]).inc();
}
