//! Mavenlink API client and types.
//!
//! This module provides the transport, endpoint registry, and response types
//! for the Mavenlink REST API.

mod auth;
mod client;
mod endpoint;
pub mod error;
pub mod types;

pub use auth::Auth;
pub use client::MavenlinkClient;
pub use endpoint::Endpoint;
pub use error::ApiError;
