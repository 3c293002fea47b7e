//! Mavenlink API response types.
//!
//! These types model the Mavenlink REST API v1 JSON payloads. Only the fields
//! that the communicator contract exposes are decoded; everything else is
//! ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response from `GET /workspaces.json`.
///
/// Workspaces arrive as an object keyed by workspace id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspacesResponse {
    /// Total number of workspaces the provider reports.
    #[serde(default)]
    pub count: u64,
    /// Workspaces keyed by id.
    #[serde(default)]
    pub workspaces: Option<BTreeMap<String, Workspace>>,
}

/// A Mavenlink workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub access_level: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub currency_symbol: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub effective_due_date: Option<String>,
}

/// Response from `GET /stories.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoriesResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub stories: Option<Vec<Story>>,
}

/// A Mavenlink story: a task, sub-task or issue inside a workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub story_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub creator_id: Option<String>,
    /// Id of the parent story; absent or empty for top-level stories.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Populated only when the request includes `include=assignees`.
    #[serde(default)]
    pub assignee_ids: Option<Vec<String>>,
}

impl Story {
    /// The parent id, treating an empty string the same as an absent one.
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Response from `GET /time_entries.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntriesResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub time_entries: Option<Vec<TimeEntry>>,
}

/// Time logged against a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    #[serde(default)]
    pub date_performed: Option<String>,
    #[serde(default)]
    pub time_in_minutes: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub story_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response from `GET /users.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

/// A Mavenlink user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
}
