//! Report backend client
//!
//! The engine reads hazard reports through the [`ReportProvider`] seam.
//! [`HttpReportProvider`] is the production implementation against the
//! app backend's REST API; it returns every report and leaves the
//! active/recency/radius filtering to the engine.

use crate::config::ReportsConfig;
use crate::error::HazardwatchError;
use crate::models::HazardReport;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Read-only source of hazard reports.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    /// Fetch all reports. The provider does not pre-filter; the engine
    /// applies its own active/recency/radius filtering.
    async fn fetch_reports(&self) -> crate::Result<Vec<HazardReport>>;
}

/// HTTP implementation against the report backend's `/api/reports`
/// endpoint.
pub struct HttpReportProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportProvider {
    /// Build a provider from the reports configuration.
    pub fn new(config: &ReportsConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| HazardwatchError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn reports_url(&self) -> String {
        format!("{}/api/reports", self.base_url)
    }
}

#[async_trait]
impl ReportProvider for HttpReportProvider {
    #[instrument(name = "fetch_reports", level = "debug", skip(self))]
    async fn fetch_reports(&self) -> crate::Result<Vec<HazardReport>> {
        let url = self.reports_url();
        debug!(%url, "fetching reports");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HazardwatchError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HazardwatchError::network(format!(
                "report backend returned HTTP {status}"
            )));
        }

        // A non-list payload is a parse failure; the engine treats it the
        // same as an unreachable backend.
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| HazardwatchError::parse(e.to_string()))?;

        if !body.is_array() {
            return Err(HazardwatchError::parse(format!(
                "expected a report list, got {}",
                json_kind(&body)
            )));
        }

        serde_json::from_value(body).map_err(|e| HazardwatchError::parse(e.to_string()))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
