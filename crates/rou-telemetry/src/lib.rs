//! Logging and metrics for rou services.
//!
//! - **Logging**: a `tracing-subscriber` registry with JSON or pretty output
//! - **Metrics**: Prometheus-format metrics via the `metrics` crate
//!
//! The router records through the `tracing` and `metrics` facades whether or
//! not anything is installed; this crate installs the backends.
//!
//! # Example
//!
//! ```no_run
//! use rou_config::RouConfig;
//! use rou_telemetry::{init_telemetry, TelemetryConfig};
//!
//! # fn main() -> rou_telemetry::TelemetryResult<()> {
//! let config = RouConfig::production();
//! init_telemetry(&TelemetryConfig::from(&config))?;
//!
//! if let Some(text) = rou_telemetry::render_metrics() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Metrics Output
//!
//! ```text
//! # HELP rou_requests_total Total number of requests dispatched by the router
//! # TYPE rou_requests_total counter
//! rou_requests_total{method="GET",outcome="handled"} 1234
//! rou_requests_total{method="GET",outcome="not_found"} 56
//! ```

#![doc(html_root_url = "https://docs.rs/rou-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, render_metrics, InFlightGuard, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Installs the log subscriber, then the metrics recorder.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to install.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}
