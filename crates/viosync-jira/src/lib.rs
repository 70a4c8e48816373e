//! # viosync-jira
//!
//! **Tier 2 (Tracker)**
//!
//! Blocking Jira REST client plus [`JiraTracker`], the [`IssueTracker`]
//! implementation that keys issues on a custom "unique field" holding the
//! unit fingerprint.
//!
//! ## What belongs here
//! * Field discovery, JQL search, create and update calls
//! * Mapping Jira responses onto [`RemoteIssue`]
//!
//! ## What does NOT belong here
//! * Rendering issue bodies (see `viosync-render`)
//! * Deciding create vs update (see `viosync-core`)

mod client;
mod tracker;

pub use client::{JiraClient, JiraField, JiraIssue, SERVICE, SearchResults};
pub use tracker::{JiraTracker, search_jql};

pub use viosync_types::{IssueTracker, RemoteIssue};
