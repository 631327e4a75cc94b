//! Prometheus metrics for the assistant
//!
//! This module provides metrics tracking for:
//! - Dialogue: turns per route, respond latency
//! - External calls: statistics store errors, translation outcomes
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, or it is never called, metrics operations are no-ops.

use prometheus::{
    register_counter_vec, register_histogram, CounterVec, Encoder, Histogram, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all assistant metrics
struct AssistantMetrics {
    turns: CounterVec,
    gateway_errors: CounterVec,
    translations: CounterVec,
    respond_duration: Histogram,
}

/// Global storage for assistant metrics
static ASSISTANT_METRICS: OnceLock<AssistantMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// # Example
///
/// ```ignore
/// if let Err(e) = vaxassist::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    // Prevent double initialization
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = AssistantMetrics {
        turns: register_counter_vec!(
            "vaxassist_turns_total",
            "Total user turns by dialogue route",
            &["route"]
        )?,
        gateway_errors: register_counter_vec!(
            "vaxassist_gateway_errors_total",
            "Statistics store failures by operation",
            &["operation"]
        )?,
        translations: register_counter_vec!(
            "vaxassist_translations_total",
            "Reply localization outcomes (dictionary, translated, failed)",
            &["outcome"]
        )?,
        respond_duration: register_histogram!(
            "vaxassist_respond_duration_seconds",
            "Time to answer one user turn in seconds",
            vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
        )?,
    };

    ASSISTANT_METRICS
        .set(metrics)
        .map_err(|_| "Assistant metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    ASSISTANT_METRICS.get().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record one answered turn
pub fn record_turn(route: &str) {
    if let Some(m) = ASSISTANT_METRICS.get() {
        m.turns.with_label_values(&[route]).inc();
    }
}

/// Record a statistics store failure
pub fn record_gateway_error(operation: &str) {
    if let Some(m) = ASSISTANT_METRICS.get() {
        m.gateway_errors.with_label_values(&[operation]).inc();
    }
}

/// Record how a reply was localized
pub fn record_translation(outcome: &str) {
    if let Some(m) = ASSISTANT_METRICS.get() {
        m.translations.with_label_values(&[outcome]).inc();
    }
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    /// Create a no-op timer when metrics are not initialized
    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Start a respond timer (returns a timer handle)
pub fn start_respond_timer() -> MetricsTimer {
    match ASSISTANT_METRICS.get() {
        Some(m) => MetricsTimer::new(m.respond_duration.start_timer()),
        None => MetricsTimer::noop(),
    }
}
