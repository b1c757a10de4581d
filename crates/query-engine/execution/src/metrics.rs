//! Metrics setup and update for the dispatcher.

use prometheus::{IntCounter, Registry};

/// The collection of all metrics exposed through the `/metrics` endpoint.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub dispatch_total: IntCounter,
    pub dispatch_error_total: IntCounter,
    pub normalization_error_total: IntCounter,
    pub diagnostic_skipped_total: IntCounter,
}

impl Metrics {
    /// Set up counters used to produce Prometheus metrics
    pub fn initialize(metrics_registry: &mut Registry) -> Result<Self, prometheus::Error> {
        let dispatch_total = add_int_counter_metric(
            metrics_registry,
            "sql_bridge_dispatch_total",
            "Total successful dispatches.",
        )?;

        let dispatch_error_total = add_int_counter_metric(
            metrics_registry,
            "sql_bridge_dispatch_error_total",
            "Total dispatches which failed to execute.",
        )?;

        let normalization_error_total = add_int_counter_metric(
            metrics_registry,
            "sql_bridge_normalization_error_total",
            "Total results whose envelope did not match the configured dialect.",
        )?;

        let diagnostic_skipped_total = add_int_counter_metric(
            metrics_registry,
            "sql_bridge_diagnostic_skipped_total",
            "Total diagnostic writes which could not be made.",
        )?;

        Ok(Self {
            dispatch_total,
            dispatch_error_total,
            normalization_error_total,
            diagnostic_skipped_total,
        })
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let int_counter =
        IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}
