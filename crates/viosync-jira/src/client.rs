use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use viosync_settings::JiraCredentials;
use viosync_types::{SyncError, SyncResult};

/// Service name used in errors and logs.
pub const SERVICE: &str = "Jira";

/// One entry of `GET /field`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraField {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub custom: bool,
}

/// One issue from a search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JiraIssue {
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Body of `GET /search`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedIssue {
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// Thin blocking client over the Jira REST API v2/v3.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    api_base: String,
    credentials: JiraCredentials,
}

fn transport(e: reqwest::Error) -> SyncError {
    SyncError::Transport {
        service: SERVICE,
        message: e.to_string(),
    }
}

impl JiraClient {
    pub fn new(
        api_base: &str,
        credentials: JiraCredentials,
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

        Ok(Self::with_http_client(api_base, credentials, http))
    }

    pub fn with_http_client(api_base: &str, credentials: JiraCredentials, http: Client) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(self.credentials.email(), Some(self.credentials.token()))
    }

    fn send(&self, builder: RequestBuilder) -> SyncResult<Response> {
        let response = self.authed(builder).send().map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            debug!(status = status.as_u16(), url = %response.url(), "Jira request failed");
            Err(SyncError::RemoteStatus {
                service: SERVICE,
                status: status.as_u16(),
            })
        }
    }

    fn decode<T: DeserializeOwned>(response: Response) -> SyncResult<T> {
        let body = response.text().map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| SyncError::InvalidResponse {
            service: SERVICE,
            message: e.to_string(),
        })
    }

    /// `GET /field`: every system and custom field visible to the caller.
    pub fn list_fields(&self) -> SyncResult<Vec<JiraField>> {
        let response = self.send(self.http.get(self.url("field")))?;
        Self::decode(response)
    }

    /// Find a field by its display name.
    pub fn field_by_name(&self, name: &str) -> SyncResult<JiraField> {
        self.list_fields()?
            .into_iter()
            .find(|f| f.name == name)
            .ok_or_else(|| {
                SyncError::config(format!(
                    "'{name}' not found in the remote Jira issue fields list. \
                     Do you have the correct field name configured?"
                ))
            })
    }

    /// `GET /search` with a JQL query.
    pub fn search(&self, jql: &str) -> SyncResult<SearchResults> {
        debug!(jql, "Searching Jira");
        let response = self.send(self.http.get(self.url("search")).query(&[("jql", jql)]))?;
        Self::decode(response)
    }

    /// `POST /issue`.
    pub(crate) fn create(&self, body: &Value) -> SyncResult<CreatedIssue> {
        let response = self.send(self.http.post(self.url("issue")).json(body))?;
        Self::decode(response)
    }

    /// `PUT /issue/{id}`. Jira answers 204 with no body.
    pub(crate) fn update(&self, id: &str, body: &Value) -> SyncResult<()> {
        self.send(self.http.put(self.url(&format!("issue/{id}"))).json(body))?;
        Ok(())
    }
}
