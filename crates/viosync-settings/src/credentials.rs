//! Credentials for the report source and the tracker.
//!
//! Lookups go through a caller-supplied function so the environment is
//! read in exactly one place (the binary).

use std::fmt;

use viosync_types::{SyncError, SyncResult};

pub const TIDELIFT_API_KEY_VAR: &str = "TIDELIFT_API_KEY";
pub const JIRA_EMAIL_VAR: &str = "JIRA_EMAIL";
pub const JIRA_TOKEN_VAR: &str = "JIRA_TOKEN";

fn required<F>(lookup: &F, name: &str) -> SyncResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SyncError::config(format!("Environment variable {name} is not set")))
}

/// Bearer token for the Tidelift API.
#[derive(Clone, PartialEq, Eq)]
pub struct TideliftCredentials {
    api_key: String,
}

impl TideliftCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn from_lookup<F>(lookup: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::new(required(&lookup, TIDELIFT_API_KEY_VAR)?))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for TideliftCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TideliftCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Basic-auth pair for the Jira REST API.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    email: String,
    token: String,
}

impl JiraCredentials {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    pub fn from_lookup<F>(lookup: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::new(
            required(&lookup, JIRA_EMAIL_VAR)?,
            required(&lookup, JIRA_TOKEN_VAR)?,
        ))
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn tidelift_key_is_read() {
        let creds = TideliftCredentials::from_lookup(env(&[(TIDELIFT_API_KEY_VAR, "k")])).unwrap();
        assert_eq!(creds.api_key(), "k");
    }

    #[test]
    fn missing_variable_is_named() {
        let err = JiraCredentials::from_lookup(env(&[(JIRA_EMAIL_VAR, "a@b.c")])).unwrap_err();
        assert!(err.to_string().contains(JIRA_TOKEN_VAR));
    }

    #[test]
    fn blank_variable_counts_as_missing() {
        assert!(TideliftCredentials::from_lookup(env(&[(TIDELIFT_API_KEY_VAR, "  ")])).is_err());
    }

    #[test]
    fn debug_redacts_secrets() {
        let jira = JiraCredentials::new("dev@acme.test", "s3cret");
        let tl = TideliftCredentials::new("s3cret");
        assert!(!format!("{jira:?}").contains("s3cret"));
        assert!(format!("{jira:?}").contains("dev@acme.test"));
        assert!(!format!("{tl:?}").contains("s3cret"));
    }
}
