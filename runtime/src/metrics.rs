//! Prometheus metrics for observability and monitoring.
//!
//! The Store records through the `metrics` facade, so nothing is collected
//! until a recorder is installed. This module names the metrics, describes
//! them, and installs a Prometheus recorder whose handle can render the
//! current values in text exposition format.
//!
//! | Metric | Type | Meaning |
//! |--------|------|---------|
//! | `store.dispatch.total` | counter | Accepted dispatches (label `store`) |
//! | `store.dispatch.rejected` | counter | Re-entrant dispatches rejected (label `store`) |
//! | `store.reducer.duration_seconds` | histogram | Reducer execution time |
//! | `store.subscribers.notified` | counter | Subscriber invocations |
//! | `store.subscribers.active` | gauge | Registered subscribers |
//!
//! # Example
//!
//! ```rust,no_run
//! use reflux_runtime::metrics::install_recorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = install_recorder()?;
//! // ... dispatch some actions ...
//! println!("{}", handle.render());
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

/// Accepted dispatches
pub const DISPATCH_TOTAL: &str = "store.dispatch.total";

/// Dispatches rejected because another dispatch was in progress
pub const DISPATCH_REJECTED: &str = "store.dispatch.rejected";

/// Reducer execution time
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Subscriber invocations
pub const SUBSCRIBERS_NOTIFIED: &str = "store.subscribers.notified";

/// Registered subscribers
pub const SUBSCRIBERS_ACTIVE: &str = "store.subscribers.active";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Register descriptions for every Store metric.
///
/// Safe to call more than once.
pub fn register_metrics() {
    describe_counter!(DISPATCH_TOTAL, Unit::Count, "Actions accepted by Store::dispatch");
    describe_counter!(
        DISPATCH_REJECTED,
        Unit::Count,
        "Actions rejected because another dispatch was in progress"
    );
    describe_histogram!(REDUCER_DURATION, Unit::Seconds, "Time spent inside the reducer");
    describe_counter!(SUBSCRIBERS_NOTIFIED, Unit::Count, "Subscriber callbacks invoked");
    describe_gauge!(SUBSCRIBERS_ACTIVE, Unit::Count, "Subscribers currently registered");
}

/// Install a Prometheus recorder as the global `metrics` recorder.
///
/// Reducer timings are bucketed for sub-millisecond work.
///
/// # Errors
///
/// Returns [`MetricsError::Build`] if the bucket configuration is rejected and
/// [`MetricsError::Install`] if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[0.000_001, 0.000_01, 0.000_1, 0.001, 0.01, 0.1],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    register_metrics();
    tracing::info!("Prometheus metrics recorder installed");

    Ok(handle)
}
