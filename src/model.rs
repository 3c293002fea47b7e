//! Normalized domain records exposed by the communicator.
//!
//! Each record is mapped from its Mavenlink counterpart in `api::types`,
//! copying only the fields of the stable contract.

use serde::{Deserialize, Serialize};

use crate::api::types;

/// A project, mapped from a Mavenlink workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub access_level: Option<String>,
    pub account_id: Option<String>,
    pub archived: bool,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub effective_due_date: Option<String>,
}

impl From<&types::Workspace> for Project {
    fn from(workspace: &types::Workspace) -> Self {
        Self {
            id: workspace.id.clone(),
            title: workspace.title.clone(),
            description: workspace.description.clone(),
            access_level: workspace.access_level.clone(),
            account_id: workspace.account_id.clone(),
            archived: workspace.archived,
            currency: workspace.currency.clone(),
            currency_symbol: workspace.currency_symbol.clone(),
            created_at: workspace.created_at.clone(),
            updated_at: workspace.updated_at.clone(),
            start_date: workspace.start_date.clone(),
            due_date: workspace.due_date.clone(),
            effective_due_date: workspace.effective_due_date.clone(),
        }
    }
}

/// A task, sub-task or issue, mapped from a Mavenlink story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub story_type: Option<String>,
    pub priority: Option<String>,
    pub state: Option<String>,
    pub archived: bool,
    pub workspace_id: Option<String>,
    pub creator_id: Option<String>,
    /// Empty for top-level tasks.
    pub parent_id: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    /// Resolved assignee, only populated for issue tasks.
    pub user: Option<User>,
}

impl Task {
    /// Whether this task has no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_empty()
    }
}

impl From<&types::Story> for Task {
    fn from(story: &types::Story) -> Self {
        Self {
            id: story.id.clone(),
            title: story.title.clone(),
            description: story.description.clone(),
            story_type: story.story_type.clone(),
            priority: story.priority.clone(),
            state: story.state.clone(),
            archived: story.archived,
            workspace_id: story.workspace_id.clone(),
            creator_id: story.creator_id.clone(),
            parent_id: story.parent().unwrap_or_default().to_string(),
            created_at: story.created_at.clone(),
            updated_at: story.updated_at.clone(),
            start_date: story.start_date.clone(),
            due_date: story.due_date.clone(),
            user: None,
        }
    }
}

/// Time logged against a task, with its resolved author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub date_performed: Option<String>,
    pub time_in_minutes: i64,
    pub notes: Option<String>,
    pub workspace_id: Option<String>,
    pub story_id: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// The entry's author, if it could be resolved.
    pub user: Option<User>,
}

impl From<&types::TimeEntry> for TimeEntry {
    fn from(entry: &types::TimeEntry) -> Self {
        Self {
            id: entry.id.clone(),
            date_performed: entry.date_performed.clone(),
            time_in_minutes: entry.time_in_minutes,
            notes: entry.notes.clone(),
            workspace_id: entry.workspace_id.clone(),
            story_id: entry.story_id.clone().unwrap_or_default(),
            created_at: entry.created_at.clone(),
            updated_at: entry.updated_at.clone(),
            user: None,
        }
    }
}

/// An account user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: Option<String>,
    pub email_address: Option<String>,
    pub headline: Option<String>,
    pub account_id: Option<String>,
}

impl From<&types::User> for User {
    fn from(user: &types::User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email_address: user.email_address.clone(),
            headline: user.headline.clone(),
            account_id: user.account_id.clone(),
        }
    }
}
