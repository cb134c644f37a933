//! Prometheus metrics for the API client.

use prometheus::{CounterVec, HistogramVec, Opts, Registry};

/// Metrics for API client operations, grouped by destination host.
#[derive(Clone)]
pub struct ApiClientMetrics {
    /// Requests by destination, method, and outcome.
    pub requests_total: CounterVec,

    /// Request duration by destination and method.
    pub request_duration_seconds: HistogramVec,

    /// Liveness probes by destination and outcome.
    pub failover_probes_total: CounterVec,
}

impl ApiClientMetrics {
    /// Create and register the metric families.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "api_client_requests_total",
                "Total API requests by destination, method, and outcome",
            ),
            &["destination", "method", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "api_client_request_duration_seconds",
                "Duration of API requests",
            )
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
            &["destination", "method"],
        )?;

        let failover_probes_total = CounterVec::new(
            Opts::new(
                "api_client_failover_probes_total",
                "Liveness probes by destination and outcome",
            ),
            &["destination", "outcome"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(failover_probes_total.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
            failover_probes_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let registry = Registry::new();
        assert!(ApiClientMetrics::new(&registry).is_ok());
    }

    #[test]
    fn test_metrics_cannot_register_twice() {
        let registry = Registry::new();
        let _first = ApiClientMetrics::new(&registry).unwrap();
        assert!(ApiClientMetrics::new(&registry).is_err());
    }
}
