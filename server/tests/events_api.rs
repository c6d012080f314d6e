//! End-to-end tests for the `/api/events` endpoints over the in-memory store.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use common::{
    body_json, build_app_with, build_test_app, create_event, send, valid_event_body,
    UnreachableRepository,
};
use serde_json::json;

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

// ---------------------------------------------------------------------------
// POST /events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_generated_fields() {
    let app = build_test_app();
    let response = send(&app, Method::POST, "/api/events", Some(valid_event_body())).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Event created successfully");

    let data = &json["data"];
    assert!(data["id"].as_i64().unwrap() > 0);
    assert_eq!(data["title"], "Summer Music Festival");
    assert_eq!(data["maxAttendees"], 5000);
    assert_eq!(data["isActive"], true);
    assert_eq!(data["createdAt"], data["updatedAt"]);
}

#[tokio::test]
async fn create_with_end_not_after_start_fails_on_end_date() {
    let app = build_test_app();
    for end in ["2031-07-04T16:00:00.000Z", "2031-07-04T10:00:00.000Z"] {
        let mut body = valid_event_body();
        body["endDate"] = json!(end);

        let response = send(&app, Method::POST, "/api/events", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["code"], "VALIDATION_ERROR");
        let details = json["details"].as_array().unwrap();
        assert!(details
            .iter()
            .any(|d| d["path"] == "endDate" && d["message"] == "End date must be after start date"));
    }
}

#[tokio::test]
async fn create_reports_per_field_messages() {
    let app = build_test_app();
    let response = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({ "title": "ab", "maxAttendees": -3, "imageUrl": "nope" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let paths: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap())
        .collect();
    for expected in [
        "title",
        "description",
        "location",
        "startDate",
        "endDate",
        "category",
        "maxAttendees",
        "imageUrl",
    ] {
        assert!(paths.contains(&expected), "no error for {expected}: {paths:?}");
    }
}

#[tokio::test]
async fn malformed_body_is_a_validation_error() {
    let app = build_test_app();

    let mut wrong_type = valid_event_body();
    wrong_type["isActive"] = json!("yes");
    let response = send(&app, Method::POST, "/api/events", Some(wrong_type)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid request body");
    assert_eq!(json["details"][0]["path"], "body");

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/events")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn is_active_false_is_kept() {
    let app = build_test_app();
    let mut body = valid_event_body();
    body["isActive"] = json!(false);
    body["maxAttendees"] = json!(null);
    let created = create_event(&app, body).await;
    assert_eq!(created["isActive"], false);
    assert!(created["maxAttendees"].is_null());
}

// ---------------------------------------------------------------------------
// GET /events, GET /events/:id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_is_newest_first() {
    let app = build_test_app();
    for title in ["First event", "Second event", "Third event"] {
        let mut body = valid_event_body();
        body["title"] = json!(title);
        create_event(&app, body).await;
    }

    let response = send(&app, Method::GET, "/api/events", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third event", "Second event", "First event"]);
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn created_event_can_be_fetched_by_id() {
    let app = build_test_app();
    let created = create_event(&app, valid_event_body()).await;
    let id = created["id"].as_i64().unwrap();

    let response = send(&app, Method::GET, &format!("/api/events/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await["data"].clone();

    assert_eq!(fetched, created);
    let submitted = valid_event_body();
    for field in ["title", "description", "location", "category", "maxAttendees", "imageUrl"] {
        assert_eq!(fetched[field], submitted[field], "{field} differs");
    }
    assert_eq!(timestamp(&fetched["startDate"]), timestamp(&submitted["startDate"]));
    assert_eq!(timestamp(&fetched["endDate"]), timestamp(&submitted["endDate"]));
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = build_test_app();

    let response = send(&app, Method::GET, "/api/events/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Event not found");
    assert_eq!(json["code"], "NOT_FOUND");

    for bad in ["abc", "-4", "1.5"] {
        let response = send(&app, Method::GET, &format!("/api/events/{bad}"), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {bad}");
        let json = body_json(response).await;
        assert_eq!(json["details"][0]["path"], "id");
        assert_eq!(json["details"][0]["message"], "Invalid event ID");
    }
}

// ---------------------------------------------------------------------------
// PUT /events/:id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partial_update_keeps_other_fields_and_advances_updated_at() {
    let app = build_test_app();
    let created = create_event(&app, valid_event_body()).await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/events/{id}"),
        Some(json!({ "location": "Dolores Park", "isActive": false })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Event updated successfully");

    let updated = &json["data"];
    assert_eq!(updated["location"], "Dolores Park");
    assert_eq!(updated["isActive"], false);
    for field in ["title", "description", "startDate", "endDate", "category", "maxAttendees", "imageUrl", "createdAt"] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }
    assert!(timestamp(&updated["updatedAt"]) > timestamp(&created["updatedAt"]));

    // An empty body still restamps.
    let response = send(&app, Method::PUT, &format!("/api/events/{id}"), Some(json!({}))).await;
    let again = body_json(response).await["data"].clone();
    assert!(timestamp(&again["updatedAt"]) > timestamp(&updated["updatedAt"]));
}

#[tokio::test]
async fn update_can_clear_nullable_fields() {
    let app = build_test_app();
    let created = create_event(&app, valid_event_body()).await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/events/{id}"),
        Some(json!({ "maxAttendees": null, "imageUrl": null })),
    )
    .await;
    let updated = body_json(response).await["data"].clone();
    assert!(updated["maxAttendees"].is_null());
    assert!(updated["imageUrl"].is_null());
    assert_eq!(updated["title"], created["title"]);
}

#[tokio::test]
async fn update_rejects_end_before_stored_start() {
    let app = build_test_app();
    let created = create_event(&app, valid_event_body()).await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/events/{id}"),
        Some(json!({ "endDate": "2031-07-04T12:00:00.000Z" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"][0]["path"], "endDate");
}

#[tokio::test]
async fn update_errors() {
    let app = build_test_app();

    let response = send(
        &app,
        Method::PUT,
        "/api/events/77",
        Some(json!({ "title": "Nobody home" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::PUT, "/api/events/x1", Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let created = create_event(&app, valid_event_body()).await;
    let id = created["id"].as_i64().unwrap();
    let response = send(
        &app,
        Method::PUT,
        &format!("/api/events/{id}"),
        Some(json!({ "description": "short" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"][0]["path"], "description");
}

// ---------------------------------------------------------------------------
// DELETE /events/:id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = build_test_app();
    let created = create_event(&app, valid_event_body()).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/events/{id}");

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!({ "id": id }));
    assert_eq!(json["message"], "Event deleted successfully");

    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_nonexistent_is_not_found() {
    let app = build_test_app();
    let response = send(&app, Method::DELETE, "/api/events/12345", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["success"], false);
}

// ---------------------------------------------------------------------------
// Unexpected failures and plumbing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_failure_is_a_generic_500() {
    let app = build_app_with(Arc::new(UnreachableRepository));

    let response = send(&app, Method::GET, "/api/events", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "An unexpected error occurred");
    assert!(json.get("details").is_none());

    let response = send(&app, Method::POST, "/api/events", Some(valid_event_body())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let app = build_test_app();

    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");

    let response = send(&app, Method::GET, "/api/nothing-here", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Route not found");
}

#[tokio::test]
async fn wrong_method_gets_an_envelope() {
    let app = build_test_app();

    let response = send(&app, Method::PATCH, "/api/events", Some(valid_event_body())).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    assert_eq!(json["error"], "Method not allowed");

    let response = send(&app, Method::POST, "/api/events/1", None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn api_responses_are_not_cached() {
    let app = build_test_app();
    let response = send(&app, Method::GET, "/api/events", None).await;
    assert_eq!(response.headers()["cache-control"], "no-store");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}
