//! # viosync-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the core data structures and contracts for `viosync`.
//! It contains data types, Serde definitions, the error taxonomy and the
//! collaborator traits the reconciliation pipeline is written against.
//!
//! ## What belongs here
//! * Violation records, key-paths, grouped units and fingerprints
//! * Tracker-facing payload and issue shapes
//! * Run totals
//! * `SyncError` and the `ReportSource` / `IssueTracker` traits
//!
//! ## What does NOT belong here
//! * HTTP transport
//! * CLI argument parsing
//! * Grouping, hashing or rendering logic

mod error;
mod port;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use error::{ErrorKind, SyncError, SyncResult};
pub use port::{IssueTracker, ReportSource};

/// Violation fields listed in issue descriptions unless configured otherwise.
pub const DEFAULT_DESCRIPTION_FIELDS: [&str; 5] = [
    "violation_type",
    "violation_description",
    "dependency_chain",
    "action",
    "violation_link",
];

/// One reported violation: a flat mapping of field name to value.
///
/// Records are produced by a [`ReportSource`] and never mutated by the
/// pipeline. Field lookup is explicit: [`FlatRecord::require`] fails with
/// [`SyncError::MissingField`] instead of substituting a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord(Map<String, Value>);

impl FlatRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Look up a field that must be present.
    pub fn require(&self, field: &str) -> SyncResult<&Value> {
        self.0.get(field).ok_or_else(|| SyncError::MissingField {
            field: field.to_string(),
        })
    }

    /// The string form of a key field, as used in key-paths and fingerprints.
    ///
    /// Only strings are accepted, taken verbatim. Any other value is rejected
    /// so that `1` and `"1"` can never share a key-path.
    pub fn key_component(&self, field: &str) -> SyncResult<String> {
        let value = self.require(field)?;
        let kind = match value {
            Value::String(s) => return Ok(s.clone()),
            Value::Number(_) => "a number",
            Value::Bool(_) => "a boolean",
            Value::Null => "a null",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        Err(SyncError::UnusableKeyValue {
            field: field.to_string(),
            kind,
        })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for FlatRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ordered, non-empty list of field names that partition a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct KeyFieldList(Vec<String>);

impl KeyFieldList {
    pub fn new<I, S>(fields: I) -> SyncResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(SyncError::Configuration(
                "tidelift.unique_key_parts must have at least one value".to_string(),
            ));
        }
        Ok(Self(fields))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl TryFrom<Vec<String>> for KeyFieldList {
    type Error = SyncError;

    fn try_from(fields: Vec<String>) -> SyncResult<Self> {
        Self::new(fields)
    }
}

impl From<KeyFieldList> for Vec<String> {
    fn from(list: KeyFieldList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a KeyFieldList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The ordered key values that identify a grouped unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn new(components: Vec<String>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(components: Vec<String>) -> Self {
        Self(components)
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// All violations sharing one key-path: the unit of reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedUnit {
    pub key_path: KeyPath,
    pub records: Vec<FlatRecord>,
}

/// Hex-encoded SHA-256 digest identifying a logical issue across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length of the hex form.
    pub const HEX_LEN: usize = 64;

    /// Wrap a raw 32-byte digest.
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = SyncError;

    fn from_str(s: &str) -> SyncResult<Self> {
        let valid = s.len() == Self::HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !valid {
            return Err(SyncError::Configuration(format!(
                "'{s}' is not a {}-character lowercase hex fingerprint",
                Self::HEX_LEN
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = SyncError;

    fn try_from(s: String) -> SyncResult<Self> {
        s.parse()
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

/// An issue as the tracker reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssue {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Raw value of the tracker's unique field, when the tracker returned it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl RemoteIssue {
    /// Human-facing reference: the issue key when known, else the id.
    pub fn reference(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.id)
    }
}

/// Rendered issue content handed to the tracker.
///
/// `summary` is `None` for updates, which only refresh the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub description: Value,
}

/// What reconciliation did with one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Created,
    Updated,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Created => f.write_str("Created"),
            SyncAction::Updated => f.write_str("Updated"),
        }
    }
}

/// Outcome counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationTotals {
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
}

impl ReconciliationTotals {
    /// Count one finished unit.
    pub fn record(&mut self, action: SyncAction) {
        self.processed += 1;
        match action {
            SyncAction::Created => self.created += 1,
            SyncAction::Updated => self.updated += 1,
        }
    }
}

impl fmt::Display for ReconciliationTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Totals: {} total, {} added, {} updated",
            self.processed, self.created, self.updated
        )
    }
}
