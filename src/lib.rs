//! Mavenlink Communicator - a normalizing gateway for the Mavenlink API.
//!
//! Translates Mavenlink workspaces, stories, time entries and users into a
//! stable set of records, correlating them across endpoints.

pub mod aggregator;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;

pub use aggregator::Aggregator;
pub use config::EnvironmentConfiguration;
pub use error::{AppError, ErrorResponse};
pub use service::{CommunicatorService, Request, Response};
