//! Tidelift external API client (blocking reqwest).

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info};
use viosync_settings::{TideliftCredentials, TideliftSettings};
use viosync_types::{FlatRecord, ReportSource, SyncError, SyncResult};

use crate::parse_report;

/// Service name used in errors and logs.
pub const SERVICE: &str = "Tidelift";

/// Client for the all-projects violations report.
#[derive(Debug, Clone)]
pub struct TideliftClient {
    http: Client,
    api_base: String,
    organization: String,
    catalog: String,
    credentials: TideliftCredentials,
}

impl TideliftClient {
    pub fn new(
        settings: &TideliftSettings,
        credentials: TideliftCredentials,
        timeout: Duration,
    ) -> SyncResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("viosync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SyncError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(settings, credentials, http))
    }

    /// Create a client around a pre-built `reqwest` client.
    pub fn with_http_client(
        settings: &TideliftSettings,
        credentials: TideliftCredentials,
        http: Client,
    ) -> Self {
        Self {
            http,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            organization: settings.organization.trim_matches('/').to_string(),
            catalog: settings.catalog.clone(),
            credentials,
        }
    }

    /// Report endpoint, without the catalog query.
    pub fn report_url(&self) -> String {
        format!(
            "{}/{}/reports/all_projects_violations",
            self.api_base, self.organization
        )
    }

    /// Fetch the all-projects violations report.
    ///
    /// Tidelift regenerates this report daily for subscribers.
    pub fn all_projects_violations_report(&self) -> SyncResult<Vec<FlatRecord>> {
        let url = self.report_url();
        debug!(url = %url, catalog = %self.catalog, "Fetching violations report");

        let response = self
            .http
            .get(&url)
            .query(&[("catalog_name", self.catalog.as_str())])
            .bearer_auth(self.credentials.api_key())
            .send()
            .map_err(|e| SyncError::Transport {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::RemoteStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| SyncError::Transport {
            service: SERVICE,
            message: e.to_string(),
        })?;
        let records = parse_report(&body, SERVICE)?;
        info!(violations = records.len(), "Fetched violations report");
        Ok(records)
    }
}

impl ReportSource for TideliftClient {
    fn fetch_violations(&self) -> SyncResult<Vec<FlatRecord>> {
        self.all_projects_violations_report()
    }
}
