//! The communicator service facade.
//!
//! Each call takes a [`Request`] envelope, delegates to exactly one
//! [`Aggregator`] operation and copies the result into a [`Response`]
//! envelope. Failures are converted to [`ErrorResponse`] here and nowhere
//! else.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::aggregator::Aggregator;
use crate::api::error::ApiError;
use crate::error::ErrorResponse;
use crate::model::{Project, Task, TimeEntry, User};

/// Inbound request envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Workspace (project) id.
    #[serde(default)]
    pub workspace: String,
    /// Task id.
    #[serde(default)]
    pub task: String,
    /// Parent task id for issue-task listings.
    #[serde(default)]
    pub sub_task: String,
    /// Generic key or id, used for user lookups.
    #[serde(default)]
    pub key_or_id: String,
}

/// Outbound response envelope. Each call fills exactly one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeentries: Vec<TimeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Result type for service calls.
pub type ServiceResult = std::result::Result<Response, ErrorResponse>;

/// Dispatches inbound calls onto the aggregator.
#[derive(Debug, Clone)]
pub struct CommunicatorService {
    aggregator: Aggregator,
}

impl CommunicatorService {
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }

    /// Retrieve every project.
    pub async fn get_all_projects(&self, _req: &Request) -> ServiceResult {
        log_request("GetAllProjects");
        let projects = self
            .aggregator
            .list_projects()
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve projects"))?;

        Ok(Response {
            projects,
            ..Default::default()
        })
    }

    /// Retrieve one project by `req.workspace`.
    pub async fn get_project_by_id(&self, req: &Request) -> ServiceResult {
        log_request("GetProjectById");
        let project = self
            .aggregator
            .get_project(&req.workspace)
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve project"))?;

        Ok(Response {
            project,
            ..Default::default()
        })
    }

    /// Retrieve the top-level tasks of `req.workspace`.
    pub async fn get_tasks_by_project_id(&self, req: &Request) -> ServiceResult {
        log_request("GetTasksByProjectId");
        let tasks = self
            .aggregator
            .list_top_level_tasks(&req.workspace)
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve tasks"))?;

        Ok(Response {
            tasks,
            ..Default::default()
        })
    }

    /// Retrieve the sub-tasks of `req.task` in `req.workspace`.
    pub async fn get_sub_tasks_by_parent_task_and_project_id(&self, req: &Request) -> ServiceResult {
        log_request("GetSubTasksByParentTaskAndProjectId");
        let tasks = self
            .aggregator
            .list_sub_tasks(&req.workspace, &req.task)
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve sub-tasks"))?;

        Ok(Response {
            tasks,
            ..Default::default()
        })
    }

    /// Retrieve the issue tasks under `req.sub_task`, with assignees.
    pub async fn get_tasks_by_sub_task_parent_task_and_project_id(
        &self,
        req: &Request,
    ) -> ServiceResult {
        log_request("GetTasksBySubTaskParentTaskAndProjectId");
        let tasks = self
            .aggregator
            .list_issue_tasks(&req.workspace, &req.sub_task)
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve issue tasks"))?;

        Ok(Response {
            tasks,
            ..Default::default()
        })
    }

    /// Retrieve the time entries logged against `req.task`.
    pub async fn get_time_entries(&self, req: &Request) -> ServiceResult {
        log_request("GetTimeentries");
        let timeentries = self
            .aggregator
            .list_time_entries(&req.workspace, &req.task)
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve time entries"))?;

        Ok(Response {
            timeentries,
            ..Default::default()
        })
    }

    /// Retrieve the participants of `req.workspace`.
    pub async fn get_users(&self, req: &Request) -> ServiceResult {
        log_request("GetUsers");
        let users = self
            .aggregator
            .list_users(&req.workspace)
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve users"))?;

        Ok(Response {
            users,
            ..Default::default()
        })
    }

    /// Retrieve the participant `req.key_or_id` of `req.workspace`.
    pub async fn get_user(&self, req: &Request) -> ServiceResult {
        log_request("GetUser");
        let user = self
            .aggregator
            .get_user(&req.workspace, &req.key_or_id)
            .await
            .map_err(|e| self.format_error(e, "Failed to retrieve user"))?;

        Ok(Response {
            user,
            ..Default::default()
        })
    }

    fn format_error(&self, err: ApiError, message: &str) -> ErrorResponse {
        error!("{}: {}", message, err);
        ErrorResponse::format(&err, self.aggregator.config().debug, message)
    }
}

fn log_request(method: &str) {
    info!(method, "server request");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serializes_only_filled_field() {
        let response = Response {
            users: vec![User {
                id: "u1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(json["users"][0]["id"], "u1");
    }

    #[test]
    fn test_empty_response_serializes_to_empty_object() {
        let json = serde_json::to_string(&Response::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_request_defaults_missing_fields() {
        let req: Request = serde_json::from_str(r#"{"workspace": "100"}"#).unwrap();
        assert_eq!(req.workspace, "100");
        assert!(req.task.is_empty());
        assert!(req.key_or_id.is_empty());
    }
}
