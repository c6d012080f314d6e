//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use evently_core::{Event, EventId, EventPatch, NewEvent};
use evently_server::repository::{EventRepository, InMemoryEventRepository};
use evently_server::{create_routes, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config::default()
}

/// Full router with the production middleware stack over an in-memory store.
pub fn build_test_app() -> Router {
    build_app_with(Arc::new(InMemoryEventRepository::new()))
}

pub fn build_app_with(repo: Arc<dyn EventRepository>) -> Router {
    create_routes(AppState::new(repo), &test_config())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn valid_event_body() -> Value {
    json!({
        "title": "Summer Music Festival",
        "description": "Three stages of live music in the park",
        "location": "Golden Gate Park",
        "startDate": "2031-07-04T16:00:00.000Z",
        "endDate": "2031-07-04T23:30:00.000Z",
        "category": "Music",
        "maxAttendees": 5000,
        "imageUrl": "https://example.com/festival.jpg"
    })
}

/// Creates an event through the API and returns the `data` payload.
pub async fn create_event(app: &Router, body: Value) -> Value {
    let response = send(app, Method::POST, "/api/events", Some(body)).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}

/// Store whose every call fails as if the database were unreachable.
pub struct UnreachableRepository;

#[async_trait]
impl EventRepository for UnreachableRepository {
    async fn create(&self, _event: NewEvent) -> Result<Event, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn list_all(&self) -> Result<Vec<Event>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn get_by_id(&self, _id: EventId) -> Result<Option<Event>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(&self, _id: EventId, _patch: EventPatch) -> Result<Option<Event>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete(&self, _id: EventId) -> Result<bool, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}
