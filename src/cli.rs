//! Command-line interface.
//!
//! Each subcommand maps onto one service call. The response envelope is
//! written to stdout as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::service::{CommunicatorService, Request, ServiceResult};

/// Query Mavenlink through the communicator contract.
#[derive(Debug, Parser)]
#[command(name = "mavenlink-communicator", version, about)]
pub struct Cli {
    /// Read configuration from a TOML file instead of the environment.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Service calls exposed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every project.
    Projects,
    /// Show one project.
    Project {
        #[arg(long)]
        workspace: String,
    },
    /// List the top-level tasks of a project.
    Tasks {
        #[arg(long)]
        workspace: String,
    },
    /// List the sub-tasks of a task.
    SubTasks {
        #[arg(long)]
        workspace: String,
        #[arg(long)]
        task: String,
    },
    /// List the issue tasks under a sub-task, with assignees.
    IssueTasks {
        #[arg(long)]
        workspace: String,
        #[arg(long)]
        sub_task: String,
    },
    /// List the time entries logged against a task, with authors.
    TimeEntries {
        #[arg(long)]
        workspace: String,
        #[arg(long)]
        task: String,
    },
    /// List the participants of a project.
    Users {
        #[arg(long)]
        workspace: String,
    },
    /// Show one participant of a project.
    User {
        #[arg(long)]
        workspace: String,
        #[arg(long)]
        user: String,
    },
}

impl Command {
    /// Build the request envelope for this command.
    pub fn request(&self) -> Request {
        match self {
            Command::Projects => Request::default(),
            Command::Project { workspace }
            | Command::Tasks { workspace }
            | Command::Users { workspace } => Request {
                workspace: workspace.clone(),
                ..Default::default()
            },
            Command::SubTasks { workspace, task } | Command::TimeEntries { workspace, task } => {
                Request {
                    workspace: workspace.clone(),
                    task: task.clone(),
                    ..Default::default()
                }
            }
            Command::IssueTasks {
                workspace,
                sub_task,
            } => Request {
                workspace: workspace.clone(),
                sub_task: sub_task.clone(),
                ..Default::default()
            },
            Command::User { workspace, user } => Request {
                workspace: workspace.clone(),
                key_or_id: user.clone(),
                ..Default::default()
            },
        }
    }

    /// Run this command against the service.
    pub async fn dispatch(&self, service: &CommunicatorService) -> ServiceResult {
        let req = self.request();
        match self {
            Command::Projects => service.get_all_projects(&req).await,
            Command::Project { .. } => service.get_project_by_id(&req).await,
            Command::Tasks { .. } => service.get_tasks_by_project_id(&req).await,
            Command::SubTasks { .. } => {
                service
                    .get_sub_tasks_by_parent_task_and_project_id(&req)
                    .await
            }
            Command::IssueTasks { .. } => {
                service
                    .get_tasks_by_sub_task_parent_task_and_project_id(&req)
                    .await
            }
            Command::TimeEntries { .. } => service.get_time_entries(&req).await,
            Command::Users { .. } => service.get_users(&req).await,
            Command::User { .. } => service.get_user(&req).await,
        }
    }
}
