//! SAP OData Client
//!
//! Thin HTTP client for the vendor portal OData service. One call per request,
//! no retries. Transport failures, SAP error statuses and odd bodies are
//! mapped onto [`PortalError`] here so handlers only decide the
//! endpoint-specific policy.

use std::time::{Duration, Instant};

use reqwest::{header::ACCEPT, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use vendor_portal_models::{odata, EntitySet};
use vendor_portal_utils::{PortalError, PortalResult, SapConfig};

use crate::metrics::{GatewayMetrics, SapOutcome};

const JSON: &str = "application/json";
const XML: &str = "application/xml";

/// Shared SAP client. Cloning reuses the connection pool.
#[derive(Clone)]
pub struct SapClient {
    client: Client,
    service_root: String,
    username: String,
    password: String,
    metrics: GatewayMetrics,
}

impl SapClient {
    pub fn new(config: &SapConfig, metrics: GatewayMetrics) -> PortalResult<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder.build().map_err(|e| {
            PortalError::configuration(format!("failed to build SAP HTTP client: {}", e))
        })?;

        if config.accept_invalid_certs {
            warn!("TLS certificate verification towards SAP is disabled");
        }

        Ok(Self {
            client,
            service_root: config.service_root(),
            username: config.username.clone(),
            password: config.password.clone(),
            metrics,
        })
    }

    pub fn service_root(&self) -> &str {
        &self.service_root
    }

    /// Absolute URL for a path relative to the service root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.service_root, path.trim_start_matches('/'))
    }

    /// Rows of a JSON read, unwrapped from the OData envelope. A 2xx body that
    /// is not JSON yields no rows.
    pub async fn fetch_rows(&self, set: EntitySet, path: &str) -> PortalResult<Vec<Value>> {
        let body = self.get(set, path, JSON).await?;

        let rows = match serde_json::from_str::<Value>(&body) {
            Ok(json) => odata::unwrap(&json),
            Err(e) => {
                warn!(entity_set = %set, error = %e, "SAP returned a non-JSON body, treating it as empty");
                Vec::new()
            }
        };

        info!(entity_set = %set, rows = rows.len(), "SAP rows received");
        Ok(rows)
    }

    /// Raw XML body of an Atom read.
    pub async fn fetch_xml(&self, set: EntitySet, path: &str) -> PortalResult<String> {
        self.get(set, path, XML).await
    }

    /// Probe the service root. Any HTTP answer means SAP is reachable.
    pub async fn ping(&self) -> PortalResult<StatusCode> {
        let response = self
            .client
            .get(format!("{}/", self.service_root))
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| PortalError::upstream_unreachable(e.to_string()))?;
        Ok(response.status())
    }

    async fn get(&self, set: EntitySet, path: &str, accept: &str) -> PortalResult<String> {
        let url = self.url(path);
        let started = Instant::now();
        // Key predicates can carry credentials (ZLOGIN_AUTHSet), so the URL
        // is never logged.
        debug!(entity_set = %set, "Calling SAP");

        let response = match self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, accept)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(self.unreachable(set, started, e)),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Err(self.unreachable(set, started, e)),
        };

        if !status.is_success() {
            self.metrics
                .observe_sap_call(set, SapOutcome::UpstreamError, started.elapsed());
            let message = odata::extract_error_message(&body);
            warn!(
                entity_set = %set,
                status = status.as_u16(),
                message = %message,
                "SAP returned an error status"
            );
            return Err(PortalError::upstream(status.as_u16(), message));
        }

        self.metrics
            .observe_sap_call(set, SapOutcome::Success, started.elapsed());
        debug!(entity_set = %set, status = status.as_u16(), bytes = body.len(), "SAP call completed");
        Ok(body)
    }

    fn unreachable(&self, set: EntitySet, started: Instant, e: reqwest::Error) -> PortalError {
        let e = e.without_url();
        self.metrics
            .observe_sap_call(set, SapOutcome::Unreachable, started.elapsed());
        error!(entity_set = %set, error = %e, "SAP service unreachable");
        PortalError::upstream_unreachable(e.to_string())
    }
}
