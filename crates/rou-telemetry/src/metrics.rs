//! Prometheus metrics for rou services.
//!
//! Recording goes through the `metrics` facade, so the functions here are
//! no-ops until [`init_metrics`] installs the Prometheus recorder.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `rou_requests_total` | Counter | `method`, `outcome` | Dispatched requests |
//! | `rou_dispatch_duration_seconds` | Histogram | `method` | Time spent in middleware and handler |
//! | `rou_in_flight_requests` | Gauge | - | Requests currently being served |
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use rou_telemetry::metrics::record_dispatch;
//!
//! record_dispatch("GET", "handled", Duration::from_millis(3));
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use rou_config::MetricsSection;

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Counter of dispatched requests.
pub const REQUESTS_TOTAL: &str = "rou_requests_total";

/// Histogram of dispatch durations.
pub const DISPATCH_DURATION_SECONDS: &str = "rou_dispatch_duration_seconds";

/// Gauge of requests being served.
pub const IN_FLIGHT_REQUESTS: &str = "rou_in_flight_requests";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Value of the `service` label attached to every metric, if any.
    pub service_name: Option<String>,

    /// Histogram buckets for dispatch duration, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: None,
            duration_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 5.0,
            ],
        }
    }
}

impl From<&MetricsSection> for MetricsConfig {
    fn from(section: &MetricsSection) -> Self {
        Self {
            enabled: section.enabled,
            ..Self::default()
        }
    }
}

/// Installs the Prometheus recorder as the global `metrics` recorder.
///
/// Calling it again after a successful install is a no-op.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if the buckets are rejected or a
/// different recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled || METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let mut builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(DISPATCH_DURATION_SECONDS.to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    if let Some(service) = &config.service_name {
        builder = builder.add_global_label("service", service.clone());
    }

    let handle = builder
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    // A concurrent winner already holds an equivalent handle.
    let _ = METRICS_HANDLE.set(handle);

    describe_metrics();
    Ok(())
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn describe_metrics() {
    describe_counter!(REQUESTS_TOTAL, "Total number of requests dispatched by the router");
    describe_histogram!(
        DISPATCH_DURATION_SECONDS,
        "Time spent running middleware and the handler, in seconds"
    );
    describe_gauge!(
        IN_FLIGHT_REQUESTS,
        "Number of requests currently being served"
    );
}

/// Records one dispatched request.
///
/// `outcome` names how dispatch ended (e.g., "handled", "not_found").
pub fn record_dispatch(method: &str, outcome: &'static str, duration: Duration) {
    counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(DISPATCH_DURATION_SECONDS, "method" => method.to_string())
        .record(duration.as_secs_f64());
}

/// Guard that tracks one in-flight request for its lifetime.
#[derive(Debug)]
pub struct InFlightGuard {
    _private: (),
}

impl InFlightGuard {
    /// Increments the in-flight gauge.
    #[must_use]
    pub fn new() -> Self {
        gauge!(IN_FLIGHT_REQUESTS).increment(1.0);
        Self { _private: () }
    }
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        gauge!(IN_FLIGHT_REQUESTS).decrement(1.0);
    }
}
