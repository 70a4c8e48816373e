//! # viosync-render
//!
//! **Tier 1 (Rendering)**
//!
//! Turns a [`GroupedUnit`] into the human-readable parts of an issue.
//! Rendering is pure: the same unit always produces the same payload.
//!
//! ## What belongs here
//! * The [`IssueBodyRenderer`] contract
//! * The default Atlassian Document Format renderer
//!
//! ## What does NOT belong here
//! * Tracker wire format (project, issue type, unique field)
//! * Network calls

use serde_json::{Value, json};
use viosync_types::{DEFAULT_DESCRIPTION_FIELDS, GroupedUnit, IssuePayload};

/// Joins key-path components into an issue summary.
pub const SUMMARY_SEPARATOR: &str = " - ";

/// Paragraph written after each violation in a description.
pub const RECORD_SEPARATOR: &str = "---------------------------------------";

/// Renders the summary and description of an issue for one unit.
///
/// Implementations must be deterministic functions of the unit.
pub trait IssueBodyRenderer {
    fn summary(&self, unit: &GroupedUnit) -> String;

    fn description(&self, unit: &GroupedUnit) -> Value;

    /// Content for a new issue: summary and description.
    fn create_payload(&self, unit: &GroupedUnit) -> IssuePayload {
        IssuePayload {
            summary: Some(self.summary(unit)),
            description: self.description(unit),
        }
    }

    /// Content for an existing issue: the description only.
    fn update_payload(&self, unit: &GroupedUnit) -> IssuePayload {
        IssuePayload {
            summary: None,
            description: self.description(unit),
        }
    }
}

impl<R: IssueBodyRenderer + ?Sized> IssueBodyRenderer for &R {
    fn summary(&self, unit: &GroupedUnit) -> String {
        (**self).summary(unit)
    }

    fn description(&self, unit: &GroupedUnit) -> Value {
        (**self).description(unit)
    }
}

/// Renders descriptions as an Atlassian Document Format `doc`.
///
/// Each violation becomes one `"<field>: <value>"` paragraph per configured
/// field, followed by a [`RECORD_SEPARATOR`] paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdfRenderer {
    fields: Vec<String>,
}

impl AdfRenderer {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Default for AdfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION_FIELDS)
    }
}

impl IssueBodyRenderer for AdfRenderer {
    fn summary(&self, unit: &GroupedUnit) -> String {
        unit.key_path.join(SUMMARY_SEPARATOR)
    }

    fn description(&self, unit: &GroupedUnit) -> Value {
        let mut content = Vec::with_capacity(unit.records.len() * (self.fields.len() + 1));
        for record in &unit.records {
            for field in &self.fields {
                let value = record.get(field).map(display_value).unwrap_or_default();
                content.push(paragraph(format!("{field}: {value}")));
            }
            content.push(paragraph(RECORD_SEPARATOR.to_string()));
        }
        json!({
            "version": 1,
            "type": "doc",
            "content": content,
        })
    }
}

fn paragraph(text: String) -> Value {
    json!({
        "type": "paragraph",
        "content": [{ "type": "text", "text": text }],
    })
}

/// Plain-text form of a report value.
///
/// Strings are shown without quotes, arrays as comma-separated items and
/// null as nothing. Objects fall back to compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
