use serde_json::{Map, Value, json};
use tracing::{debug, warn};
use viosync_settings::JiraSettings;
use viosync_types::{
    Fingerprint, IssuePayload, IssueTracker, RemoteIssue, SyncError, SyncResult,
};

use crate::client::{JiraClient, JiraField, SERVICE};

/// JQL matching the unique field against a fingerprint.
///
/// Uses the text-contains operator; a full 64-char hex digest only matches
/// itself in practice.
pub fn search_jql(field_name: &str, fingerprint: &Fingerprint) -> String {
    format!("'{field_name}[Short text]' ~ '{fingerprint}'")
}

/// [`IssueTracker`] over Jira, keyed on a resolved unique field.
#[derive(Debug, Clone)]
pub struct JiraTracker {
    client: JiraClient,
    unique_field: JiraField,
    project_key: String,
    issue_type: String,
}

impl JiraTracker {
    /// Resolve the configured unique field name and bind the tracker to it.
    pub fn connect(client: JiraClient, settings: &JiraSettings) -> SyncResult<Self> {
        let unique_field = client.field_by_name(&settings.unique_field_name)?;
        debug!(
            field = %unique_field.name,
            id = %unique_field.id,
            "Resolved unique field"
        );
        Ok(Self::with_field(
            client,
            unique_field,
            &settings.project_id,
            &settings.issue_type,
        ))
    }

    pub fn with_field(
        client: JiraClient,
        unique_field: JiraField,
        project_key: &str,
        issue_type: &str,
    ) -> Self {
        Self {
            client,
            unique_field,
            project_key: project_key.to_string(),
            issue_type: issue_type.to_string(),
        }
    }

    pub fn unique_field(&self) -> &JiraField {
        &self.unique_field
    }

    /// Body for `POST /issue`.
    pub fn create_body(&self, payload: &IssuePayload, fingerprint: &Fingerprint) -> Value {
        let mut fields = Map::new();
        if let Some(summary) = &payload.summary {
            fields.insert("summary".to_string(), Value::String(summary.clone()));
        }
        fields.insert("description".to_string(), payload.description.clone());
        fields.insert(
            self.unique_field.id.clone(),
            Value::String(fingerprint.to_string()),
        );
        fields.insert("project".to_string(), json!({ "key": self.project_key }));
        fields.insert("issuetype".to_string(), json!({ "id": self.issue_type }));
        json!({ "fields": fields })
    }

    /// Body for `PUT /issue/{id}`. Only the description is refreshed.
    pub fn update_body(payload: &IssuePayload) -> Value {
        json!({ "fields": { "description": payload.description } })
    }
}

impl IssueTracker for JiraTracker {
    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> SyncResult<Option<RemoteIssue>> {
        let results = self
            .client
            .search(&search_jql(&self.unique_field.name, fingerprint))?;
        if results.total == 0 {
            return Ok(None);
        }
        if results.total > 1 {
            warn!(
                fingerprint = %fingerprint,
                matches = results.total,
                "Multiple issues share a fingerprint; updating the first"
            );
        }
        let issue = results
            .issues
            .into_iter()
            .next()
            .ok_or_else(|| SyncError::InvalidResponse {
                service: SERVICE,
                message: format!(
                    "search reported {} match(es) for {fingerprint} but returned no issues",
                    results.total
                ),
            })?;
        Ok(Some(RemoteIssue {
            fingerprint: issue
                .fields
                .get(&self.unique_field.id)
                .and_then(Value::as_str)
                .map(str::to_string),
            id: issue.id,
            key: issue.key,
        }))
    }

    fn create_issue(
        &self,
        payload: &IssuePayload,
        fingerprint: &Fingerprint,
    ) -> SyncResult<RemoteIssue> {
        let created = self.client.create(&self.create_body(payload, fingerprint))?;
        Ok(RemoteIssue {
            id: created.id,
            key: created.key,
            fingerprint: Some(fingerprint.to_string()),
        })
    }

    fn update_issue(&self, issue: &RemoteIssue, payload: &IssuePayload) -> SyncResult<()> {
        self.client.update(&issue.id, &Self::update_body(payload))
    }
}
