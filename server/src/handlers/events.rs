//! Handlers for the five `/events` endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use evently_core::validation::parse_event_id;
use evently_core::{CreateEventInput, DeletedEvent, UpdateEventInput};

use crate::state::AppState;
use crate::utils::extract::ApiJson;
use crate::utils::response::{success, success_with_message};
use crate::utils::{AppError, AppResult};

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> AppResult<Response> {
    let events = state.events.list().await?;
    Ok(success(events))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateEventInput>,
) -> AppResult<Response> {
    let event = state.events.create(input).await?;
    Ok(success_with_message(
        event,
        "Event created successfully",
        StatusCode::CREATED,
    ))
}

/// GET /events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_event_id(&raw_id)?;
    let event = state.events.get(id).await?;
    Ok(success(event))
}

/// PUT /events/:id
///
/// The id is checked before the body so a bad id wins over a bad body.
pub async fn update_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<ApiJson<UpdateEventInput>, AppError>,
) -> AppResult<Response> {
    let id = parse_event_id(&raw_id)?;
    let ApiJson(input) = body?;
    let event = state.events.update(id, input).await?;
    Ok(success_with_message(
        event,
        "Event updated successfully",
        StatusCode::OK,
    ))
}

/// DELETE /events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_event_id(&raw_id)?;
    let id = state.events.delete(id).await?;
    Ok(success_with_message(
        DeletedEvent { id },
        "Event deleted successfully",
        StatusCode::OK,
    ))
}
