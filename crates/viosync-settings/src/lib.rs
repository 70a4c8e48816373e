//! # viosync-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings types for a sync run, parsed from `viosync.toml`,
//! plus the credential types the collaborators are built from.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Defaults and validation
//! * Credential lookup through an injected lookup function
//!
//! ## What does NOT belong here
//! * Clap parsing (use viosync-config)
//! * File discovery and environment access
//! * Business logic

mod credentials;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use viosync_types::{DEFAULT_DESCRIPTION_FIELDS, KeyFieldList, SyncError, SyncResult};

pub use credentials::{
    JIRA_EMAIL_VAR, JIRA_TOKEN_VAR, JiraCredentials, TIDELIFT_API_KEY_VAR, TideliftCredentials,
};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "viosync.toml";

/// Base URL of the Tidelift external API.
pub const DEFAULT_TIDELIFT_API_BASE: &str = "https://api.tidelift.com/external-api/v1";

/// Catalog used when none is configured.
pub const DEFAULT_CATALOG: &str = "default";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root of `viosync.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncSettings {
    /// Where violations come from and how they are grouped.
    pub tidelift: TideliftSettings,

    /// Where issues are written.
    pub jira: JiraSettings,

    /// Transport knobs shared by both clients.
    #[serde(default)]
    pub http: HttpSettings,
}

/// `[tidelift]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TideliftSettings {
    /// Organization path, e.g. `team/acme`.
    pub organization: String,

    /// Catalog whose violations are reported.
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// API base URL (without trailing slash).
    #[serde(default = "default_tidelift_api_base")]
    pub api_base: String,

    /// Ordered fields that identify one issue.
    pub unique_key_parts: Vec<String>,
}

/// `[jira]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JiraSettings {
    /// REST API base, e.g. `https://acme.atlassian.net/rest/api/3`.
    pub api_base: String,

    /// Display name of the custom field holding fingerprints.
    pub unique_field_name: String,

    /// Project key new issues are filed under.
    pub project_id: String,

    /// Issue type id for new issues.
    pub issue_type: String,

    /// Violation fields listed in descriptions, in order.
    #[serde(default = "default_description_fields")]
    pub description_fields: Vec<String>,
}

/// `[http]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSettings {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_catalog() -> String {
    DEFAULT_CATALOG.to_string()
}

fn default_tidelift_api_base() -> String {
    DEFAULT_TIDELIFT_API_BASE.to_string()
}

fn default_description_fields() -> Vec<String> {
    DEFAULT_DESCRIPTION_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SyncSettings {
    /// Parse and validate settings from TOML text.
    pub fn parse(s: &str) -> SyncResult<Self> {
        let settings: Self = toml::from_str(s)
            .map_err(|e| SyncError::config(format!("Failed to parse configuration: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot drive a run.
    pub fn validate(&self) -> SyncResult<()> {
        self.key_fields()?;
        require_non_empty("tidelift.organization", &self.tidelift.organization)?;
        require_non_empty("tidelift.catalog", &self.tidelift.catalog)?;
        require_url("tidelift.api_base", &self.tidelift.api_base)?;
        require_url("jira.api_base", &self.jira.api_base)?;
        require_non_empty("jira.unique_field_name", &self.jira.unique_field_name)?;
        require_non_empty("jira.project_id", &self.jira.project_id)?;
        require_non_empty("jira.issue_type", &self.jira.issue_type)?;
        if self
            .tidelift
            .unique_key_parts
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(SyncError::config(
                "tidelift.unique_key_parts must not contain empty field names",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(SyncError::config("http.timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// The grouping key, validated non-empty.
    pub fn key_fields(&self) -> SyncResult<KeyFieldList> {
        KeyFieldList::new(self.tidelift.unique_key_parts.iter().cloned())
    }

    /// Annotated starter configuration, as written by `viosync init`.
    pub fn template() -> &'static str {
        TEMPLATE
    }
}

fn require_non_empty(name: &str, value: &str) -> SyncResult<()> {
    if value.trim().is_empty() {
        return Err(SyncError::config(format!("{name} must not be empty")));
    }
    Ok(())
}

fn require_url(name: &str, value: &str) -> SyncResult<()> {
    require_non_empty(name, value)?;
    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(SyncError::config(format!(
            "{name} must be an http(s) URL, got '{value}'"
        )));
    }
    Ok(())
}

const TEMPLATE: &str = r#"# viosync configuration
#
# Credentials are read from the environment (or a .env file):
#   TIDELIFT_API_KEY, JIRA_EMAIL, JIRA_TOKEN

[tidelift]
# Organization path as shown in the Tidelift URL.
organization = "team/your-org"
catalog = "default"
# Fields that identify one issue. Violations sharing all of these values
# are reported in a single issue. Changing this list changes fingerprints.
unique_key_parts = ["package_name", "violation_type"]

[jira]
api_base = "https://your-domain.atlassian.net/rest/api/3"
# Short-text custom field that stores the issue fingerprint.
unique_field_name = "Tidelift Violation Id"
project_id = "SEC"
issue_type = "10001"
description_fields = [
    "violation_type",
    "violation_description",
    "dependency_chain",
    "action",
    "violation_link",
]

[http]
timeout_secs = 30
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use viosync_types::ErrorKind;

    const MINIMAL: &str = r#"
[tidelift]
organization = "team/acme"
unique_key_parts = ["package_name", "violation_type"]

[jira]
api_base = "https://acme.atlassian.net/rest/api/3"
unique_field_name = "Tidelift Violation Id"
project_id = "SEC"
issue_type = "10001"
"#;

    #[test]
    fn minimal_settings_fill_defaults() {
        let s = SyncSettings::parse(MINIMAL).unwrap();
        assert_eq!(s.tidelift.catalog, DEFAULT_CATALOG);
        assert_eq!(s.tidelift.api_base, DEFAULT_TIDELIFT_API_BASE);
        assert_eq!(s.jira.description_fields, DEFAULT_DESCRIPTION_FIELDS);
        assert_eq!(s.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(
            s.key_fields().unwrap().as_slice(),
            ["package_name", "violation_type"]
        );
    }

    #[test]
    fn template_parses_and_validates() {
        let s = SyncSettings::parse(SyncSettings::template()).unwrap();
        assert_eq!(s.jira.project_id, "SEC");
    }

    #[test]
    fn empty_key_parts_is_configuration_error() {
        let text = MINIMAL.replace(
            r#"unique_key_parts = ["package_name", "violation_type"]"#,
            "unique_key_parts = []",
        );
        let err = SyncSettings::parse(&text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("unique_key_parts"));
    }

    #[test]
    fn missing_section_is_parse_error() {
        let err = SyncSettings::parse("[tidelift]\norganization = \"x\"\n").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse configuration"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = format!("{MINIMAL}\n[extra]\nfoo = 1\n");
        assert!(SyncSettings::parse(&text).is_err());
    }

    #[test]
    fn non_http_api_base_is_rejected() {
        let text = MINIMAL.replace("https://acme.atlassian.net", "ftp://acme");
        let err = SyncSettings::parse(&text).unwrap_err();
        assert!(err.to_string().contains("jira.api_base"));
    }

    #[test]
    fn blank_key_part_is_rejected() {
        let text = MINIMAL.replace(r#""violation_type"]"#, r#""  "]"#);
        assert!(SyncSettings::parse(&text).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let text = format!("{MINIMAL}\n[http]\ntimeout_secs = 0\n");
        assert!(SyncSettings::parse(&text).is_err());
    }
}
