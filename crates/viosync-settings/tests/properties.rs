use proptest::prelude::*;
use viosync_settings::{DEFAULT_CATALOG, DEFAULT_TIMEOUT_SECS, SyncSettings};

fn config(key_parts: &[String], timeout: Option<u64>) -> String {
    let parts = key_parts
        .iter()
        .map(|p| format!("{p:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    let http = timeout
        .map(|t| format!("\n[http]\ntimeout_secs = {t}\n"))
        .unwrap_or_default();
    format!(
        r#"
[tidelift]
organization = "team/acme"
unique_key_parts = [{parts}]

[jira]
api_base = "https://acme.atlassian.net/rest/api/3"
unique_field_name = "Tidelift ID"
project_id = "SEC"
issue_type = "10001"
{http}"#
    )
}

proptest! {
    #[test]
    fn key_parts_keep_their_order(parts in prop::collection::vec("[a-z_]{1,16}", 1..6)) {
        let settings = SyncSettings::parse(&config(&parts, None)).unwrap();
        let fields = settings.key_fields().unwrap();
        prop_assert_eq!(fields.as_slice(), parts.as_slice());
        prop_assert_eq!(settings.tidelift.catalog.as_str(), DEFAULT_CATALOG);
        prop_assert_eq!(settings.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn positive_timeouts_are_accepted(t in 1u64..3600) {
        let settings = SyncSettings::parse(&config(&["package_name".to_string()], Some(t))).unwrap();
        prop_assert_eq!(settings.http.timeout().as_secs(), t);
    }

    #[test]
    fn blank_key_part_is_rejected(ws in "[ \t]{0,4}") {
        let parts = vec!["package_name".to_string(), ws];
        prop_assert!(SyncSettings::parse(&config(&parts, None)).is_err());
    }
}

