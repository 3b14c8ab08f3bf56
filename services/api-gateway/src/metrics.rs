//! Prometheus metrics for outbound SAP calls.

use std::time::Duration;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use vendor_portal_models::EntitySet;

/// Result label attached to each SAP call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SapOutcome {
    Success,
    UpstreamError,
    Unreachable,
}

impl SapOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SapOutcome::Success => "success",
            SapOutcome::UpstreamError => "upstream_error",
            SapOutcome::Unreachable => "unreachable",
        }
    }
}

/// Metric handles plus the registry they are registered in. Cloning shares
/// the underlying collectors.
#[derive(Clone)]
pub struct GatewayMetrics {
    registry: Registry,
    sap_requests: IntCounterVec,
    sap_duration: HistogramVec,
}

impl GatewayMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let sap_requests = IntCounterVec::new(
            Opts::new("portal_sap_requests_total", "SAP OData requests by entity set and outcome"),
            &["entity_set", "outcome"],
        )?;
        let sap_duration = HistogramVec::new(
            HistogramOpts::new(
                "portal_sap_request_duration_seconds",
                "SAP OData request latency in seconds",
            ),
            &["entity_set"],
        )?;

        registry.register(Box::new(sap_requests.clone()))?;
        registry.register(Box::new(sap_duration.clone()))?;

        Ok(Self {
            registry,
            sap_requests,
            sap_duration,
        })
    }

    pub fn observe_sap_call(&self, set: EntitySet, outcome: SapOutcome, elapsed: Duration) {
        self.sap_requests
            .with_label_values(&[set.name(), outcome.as_str()])
            .inc();
        self.sap_duration
            .with_label_values(&[set.name()])
            .observe(elapsed.as_secs_f64());
    }

    pub fn sap_request_count(&self, set: EntitySet, outcome: SapOutcome) -> u64 {
        self.sap_requests
            .with_label_values(&[set.name(), outcome.as_str()])
            .get()
    }

    /// Text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
