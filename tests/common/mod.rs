//! In-process mock of the Mavenlink REST API.
//!
//! Serves canned responses per path on a random local port and records every
//! request it receives, so tests can assert on headers, query strings and the
//! number of round trips.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use mavenlink_communicator::{Aggregator, CommunicatorService, EnvironmentConfiguration};

/// Path prefix the mock serves the API under.
pub const API_PREFIX: &str = "/api/v1/";

/// Token the tests configure.
pub const TOKEN: &str = "test-token";

/// A request received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, (u16, Option<Value>)>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
struct MockState {
    inner: Arc<Mutex<Inner>>,
}

/// A running mock provider.
pub struct MockProvider {
    pub base_url: String,
    state: MockState,
}

impl MockProvider {
    /// Start the mock on `127.0.0.1:0`.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = MockState::default();

        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}{}", addr, API_PREFIX),
            state,
        }
    }

    /// Answer requests for `file` (e.g. "users.json") with a JSON body.
    pub fn respond(&self, file: &str, status: u16, body: Value) {
        self.set_route(file, status, Some(body));
    }

    /// Answer requests for `file` with a bodiless status.
    pub fn respond_empty(&self, file: &str, status: u16) {
        self.set_route(file, status, None);
    }

    fn set_route(&self, file: &str, status: u16, body: Option<Value>) {
        let mut inner = self.state.inner.lock().unwrap();
        inner
            .routes
            .insert(format!("{}{}", API_PREFIX, file), (status, body));
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.inner.lock().unwrap().requests.clone()
    }

    /// Requests received for `file`.
    pub fn requests_for(&self, file: &str) -> Vec<RecordedRequest> {
        let path = format!("{}{}", API_PREFIX, file);
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Number of requests received for `file`.
    pub fn hits(&self, file: &str) -> usize {
        self.requests_for(file).len()
    }

    /// Configuration pointing at this mock.
    pub fn config(&self, debug: bool) -> EnvironmentConfiguration {
        EnvironmentConfiguration::new(self.base_url.clone(), TOKEN, debug)
    }

    /// An aggregator pointing at this mock.
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.config(false)).unwrap()
    }

    /// A service pointing at this mock.
    pub fn service(&self, debug: bool) -> CommunicatorService {
        CommunicatorService::new(Aggregator::new(self.config(debug)).unwrap())
    }
}

async fn handle(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut inner = state.inner.lock().unwrap();
    inner.requests.push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        user_agent: header_value(header::USER_AGENT),
    });

    match inner.routes.get(uri.path()) {
        Some((status, Some(body))) => {
            (StatusCode::from_u16(*status).unwrap(), Json(body.clone())).into_response()
        }
        Some((status, None)) => StatusCode::from_u16(*status).unwrap().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A users listing with the given `(id, full_name)` pairs.
pub fn users_body(users: &[(&str, &str)]) -> Value {
    let users: Vec<Value> = users
        .iter()
        .map(|(id, name)| {
            json!({
                "id": id,
                "full_name": name,
                "email_address": format!("{}@example.com", id),
                "headline": "Engineer",
                "account_id": "7"
            })
        })
        .collect();
    json!({ "count": users.len(), "users": users })
}

/// A story with an optional parent and assignees.
pub fn story(id: &str, parent_id: Option<&str>, assignees: &[&str]) -> Value {
    let mut story = json!({
        "id": id,
        "title": format!("Story {}", id),
        "story_type": "task",
        "priority": "normal",
        "state": "not started",
        "archived": false,
        "workspace_id": "100",
        "creator_id": "u1",
        "parent_id": parent_id,
        "created_at": "2019-01-02T10:00:00-08:00"
    });
    if !assignees.is_empty() {
        story["assignee_ids"] = json!(assignees);
    }
    story
}

/// A stories listing.
pub fn stories_body(stories: Vec<Value>) -> Value {
    json!({ "count": stories.len(), "stories": stories })
}

/// A time entry for a story, authored by a user.
pub fn time_entry(id: &str, story_id: &str, user_id: &str) -> Value {
    json!({
        "id": id,
        "date_performed": "2019-03-01",
        "time_in_minutes": 30,
        "notes": "Pairing",
        "workspace_id": "100",
        "story_id": story_id,
        "user_id": user_id,
        "created_at": "2019-03-01T17:00:00-08:00",
        "updated_at": "2019-03-01T17:00:00-08:00"
    })
}

/// A time entries listing.
pub fn time_entries_body(entries: Vec<Value>) -> Value {
    json!({ "count": entries.len(), "time_entries": entries })
}

/// A workspace object.
pub fn workspace(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Workspace {}", id),
        "description": "Client work",
        "access_level": "open",
        "account_id": "7",
        "archived": false,
        "currency": "USD",
        "currency_symbol": "$",
        "start_date": "2019-01-01",
        "due_date": null,
        "effective_due_date": "2019-12-31"
    })
}
