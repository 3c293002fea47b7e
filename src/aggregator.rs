//! Aggregation and correlation over the Mavenlink API.
//!
//! Every operation issues its requests strictly in sequence: the primary
//! collection fetch first, then one full user listing per reference that needs
//! resolving. Nothing is cached between or within calls.
//!
//! Provider responses are not trusted blindly. Workspace entries must be keyed
//! by their own id, and stories are re-filtered by parent id even though the
//! request already asks the provider to filter them.

use tracing::{debug, info, instrument, warn};

use crate::api::error::{ApiError, Result};
use crate::api::types::{
    Story, StoriesResponse, TimeEntriesResponse, UsersResponse, WorkspacesResponse,
};
use crate::api::{Endpoint, MavenlinkClient};
use crate::config::EnvironmentConfiguration;
use crate::model::{Project, Task, TimeEntry, User};

/// Correlates Mavenlink resources into communicator records.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: MavenlinkClient,
    config: EnvironmentConfiguration,
}

impl Aggregator {
    /// Create an aggregator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: EnvironmentConfiguration) -> Result<Self> {
        let client = MavenlinkClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// The configuration this aggregator was built with.
    pub fn config(&self) -> &EnvironmentConfiguration {
        &self.config
    }

    /// List every workspace visible to the token.
    ///
    /// Fails with `ApiError::CountMismatch` rather than returning a partial
    /// list when not every declared workspace passes the key/id check.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let response: Option<WorkspacesResponse> =
            self.client.get(Endpoint::Workspaces, &[]).await?;

        let projects = match response {
            Some(response) => projects_from_workspaces(response)?,
            None => Vec::new(),
        };

        info!("Retrieved {} projects", projects.len());
        Ok(projects)
    }

    /// Get a single workspace by id.
    ///
    /// Returns `Ok(None)` when the provider does not return a matching entry.
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let response: Option<WorkspacesResponse> = self
            .client
            .get(Endpoint::Workspaces, &[("only", id)])
            .await?;

        let Some(response) = response else {
            return Ok(None);
        };

        let workspaces = response
            .workspaces
            .ok_or(ApiError::MissingCollection(Endpoint::Workspaces.resource()))?;

        let project = workspaces
            .iter()
            .find(|(key, _)| key.as_str() == id)
            .map(|(_, workspace)| Project::from(workspace));

        if project.is_none() {
            debug!("No workspace matched id {}", id);
        }
        Ok(project)
    }

    /// List the top-level stories of a workspace.
    #[instrument(skip(self))]
    pub async fn list_top_level_tasks(&self, workspace_id: &str) -> Result<Vec<Task>> {
        let stories = self
            .fetch_stories(&[("workspace_id", workspace_id), ("parents_only", "true")])
            .await?;

        let tasks: Vec<Task> = top_level(&stories).map(Task::from).collect();
        info!("Retrieved {} top-level tasks", tasks.len());
        Ok(tasks)
    }

    /// List the direct children of a story.
    #[instrument(skip(self))]
    pub async fn list_sub_tasks(&self, workspace_id: &str, parent_id: &str) -> Result<Vec<Task>> {
        let stories = self
            .fetch_stories(&[("workspace_id", workspace_id), ("with_parent_id", parent_id)])
            .await?;

        let tasks: Vec<Task> = children_of(&stories, parent_id).map(Task::from).collect();
        info!("Retrieved {} sub-tasks", tasks.len());
        Ok(tasks)
    }

    /// List the children of a story with their assignee resolved.
    ///
    /// Each assignee id is resolved in order and overwrites the previous one,
    /// so a task carries only the last assignee's lookup result.
    #[instrument(skip(self))]
    pub async fn list_issue_tasks(
        &self,
        workspace_id: &str,
        parent_id: &str,
    ) -> Result<Vec<Task>> {
        let stories = self
            .fetch_stories(&[
                ("workspace_id", workspace_id),
                ("with_parent_id", parent_id),
                ("include", "assignees"),
            ])
            .await?;

        let mut tasks = Vec::new();
        for story in children_of(&stories, parent_id) {
            let mut task = Task::from(story);
            for assignee_id in story.assignee_ids.iter().flatten() {
                task.user = self.resolve_user(workspace_id, assignee_id).await;
            }
            tasks.push(task);
        }

        info!("Retrieved {} issue tasks", tasks.len());
        Ok(tasks)
    }

    /// List the time logged against a story, with each entry's author.
    #[instrument(skip(self))]
    pub async fn list_time_entries(
        &self,
        workspace_id: &str,
        task_id: &str,
    ) -> Result<Vec<TimeEntry>> {
        let response: Option<TimeEntriesResponse> = self
            .client
            .get(Endpoint::TimeEntries, &[("workspace_id", workspace_id)])
            .await?;

        let Some(response) = response else {
            return Ok(Vec::new());
        };

        let entries = response
            .time_entries
            .ok_or(ApiError::MissingCollection(Endpoint::TimeEntries.resource()))?;

        let mut time_entries = Vec::new();
        for entry in entries
            .iter()
            .filter(|entry| story_matches(entry.story_id.as_deref(), task_id))
        {
            let mut time_entry = TimeEntry::from(entry);
            time_entry.user = match entry.user_id.as_deref() {
                Some(user_id) => self.resolve_user(workspace_id, user_id).await,
                None => None,
            };
            time_entries.push(time_entry);
        }

        info!("Retrieved {} time entries", time_entries.len());
        Ok(time_entries)
    }

    /// List the participants of a workspace.
    #[instrument(skip(self))]
    pub async fn list_users(&self, workspace_id: &str) -> Result<Vec<User>> {
        let response: Option<UsersResponse> = self
            .client
            .get(Endpoint::Users, &[("participant_in", workspace_id)])
            .await?;

        let Some(response) = response else {
            return Ok(Vec::new());
        };

        let users = response
            .users
            .ok_or(ApiError::MissingCollection(Endpoint::Users.resource()))?;

        Ok(users.iter().map(User::from).collect())
    }

    /// Find one participant of a workspace by id.
    ///
    /// Fetches the full participant list on every call. An unknown id is
    /// `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn get_user(&self, workspace_id: &str, user_id: &str) -> Result<Option<User>> {
        let users = self.list_users(workspace_id).await?;
        Ok(users.into_iter().find(|user| user.id == user_id))
    }

    /// Resolve a user reference, treating a failed lookup as unresolved.
    async fn resolve_user(&self, workspace_id: &str, user_id: &str) -> Option<User> {
        match self.get_user(workspace_id, user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Could not resolve user {}: {}", user_id, e);
                None
            }
        }
    }

    /// Fetch the stories collection with the given filters.
    async fn fetch_stories(&self, query: &[(&str, &str)]) -> Result<Vec<Story>> {
        let response: Option<StoriesResponse> = self.client.get(Endpoint::Stories, query).await?;

        match response {
            Some(response) => response
                .stories
                .ok_or(ApiError::MissingCollection(Endpoint::Stories.resource())),
            None => Ok(Vec::new()),
        }
    }
}

/// Map a workspace listing, enforcing the key/id and declared-count checks.
fn projects_from_workspaces(response: WorkspacesResponse) -> Result<Vec<Project>> {
    let workspaces = response
        .workspaces
        .ok_or(ApiError::MissingCollection(Endpoint::Workspaces.resource()))?;

    let projects: Vec<Project> = workspaces
        .iter()
        .filter(|(key, workspace)| {
            let keyed_by_id = key.as_str() == workspace.id;
            if !keyed_by_id {
                warn!("Skipping workspace {} keyed as {}", workspace.id, key);
            }
            keyed_by_id
        })
        .map(|(_, workspace)| Project::from(workspace))
        .collect();

    let mapped = projects.len() as u64;
    if mapped != response.count {
        return Err(ApiError::CountMismatch {
            declared: response.count,
            mapped,
        });
    }

    Ok(projects)
}

/// Stories without a parent.
fn top_level(stories: &[Story]) -> impl Iterator<Item = &Story> {
    stories.iter().filter(|story| story.parent().is_none())
}

/// Stories whose parent is exactly `parent_id`.
fn children_of<'a>(stories: &'a [Story], parent_id: &'a str) -> impl Iterator<Item = &'a Story> {
    stories
        .iter()
        .filter(move |story| story.parent().is_some_and(|parent| parent == parent_id))
}

/// Case-insensitive story id comparison.
fn story_matches(story_id: Option<&str>, task_id: &str) -> bool {
    story_id.is_some_and(|id| id.to_lowercase() == task_id.to_lowercase())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::api::types::Workspace;

    fn workspace(id: &str) -> Workspace {
        Workspace {
            id: id.to_string(),
            title: Some(format!("Workspace {}", id)),
            ..Default::default()
        }
    }

    fn story(id: &str, parent_id: Option<&str>) -> Story {
        Story {
            id: id.to_string(),
            parent_id: parent_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_projects_from_workspaces_matches_count() {
        let mut workspaces = BTreeMap::new();
        workspaces.insert("1".to_string(), workspace("1"));
        workspaces.insert("2".to_string(), workspace("2"));

        let projects = projects_from_workspaces(WorkspacesResponse {
            count: 2,
            workspaces: Some(workspaces),
        })
        .unwrap();

        let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_projects_from_workspaces_rejects_miskeyed_entry() {
        let mut workspaces = BTreeMap::new();
        workspaces.insert("1".to_string(), workspace("1"));
        workspaces.insert("other".to_string(), workspace("2"));

        let err = projects_from_workspaces(WorkspacesResponse {
            count: 2,
            workspaces: Some(workspaces),
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ApiError::CountMismatch {
                declared: 2,
                mapped: 1
            }
        ));
    }

    #[test]
    fn test_projects_from_workspaces_declared_more_than_returned() {
        let mut workspaces = BTreeMap::new();
        workspaces.insert("1".to_string(), workspace("1"));

        let err = projects_from_workspaces(WorkspacesResponse {
            count: 5,
            workspaces: Some(workspaces),
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::CountMismatch { .. }));
    }

    #[test]
    fn test_projects_from_workspaces_empty() {
        let projects = projects_from_workspaces(WorkspacesResponse {
            count: 0,
            workspaces: Some(BTreeMap::new()),
        })
        .unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_projects_from_workspaces_missing_collection() {
        let err = projects_from_workspaces(WorkspacesResponse {
            count: 1,
            workspaces: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::MissingCollection("workspaces")));
    }

    #[test]
    fn test_parent_partitions_are_disjoint_and_exhaustive() {
        let stories = vec![
            story("1", None),
            story("2", Some("")),
            story("3", Some("1")),
            story("4", Some("1")),
            story("5", Some("3")),
        ];

        let roots: Vec<&str> = top_level(&stories).map(|s| s.id.as_str()).collect();
        assert_eq!(roots, vec!["1", "2"]);

        let children: Vec<&str> = stories
            .iter()
            .filter(|s| s.parent().is_some())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(children, vec!["3", "4", "5"]);
        assert_eq!(roots.len() + children.len(), stories.len());
    }

    #[test]
    fn test_children_of_matches_exact_parent() {
        let stories = vec![
            story("1", None),
            story("3", Some("1")),
            story("4", Some("10")),
            story("5", Some("1")),
        ];

        let ids: Vec<&str> = children_of(&stories, "1").map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "5"]);
    }

    #[test]
    fn test_children_of_empty_parent_matches_nothing() {
        let stories = vec![story("1", None), story("2", Some(""))];
        assert_eq!(children_of(&stories, "").count(), 0);
    }

    #[test]
    fn test_story_matches_ignores_case() {
        assert!(story_matches(Some("ABC123"), "abc123"));
        assert!(story_matches(Some("abc123"), "ABC123"));
        assert!(!story_matches(Some("abc124"), "abc123"));
        assert!(!story_matches(None, "abc123"));
    }
}
