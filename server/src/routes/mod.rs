use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderName, HeaderValue};
use axum::{routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::events::{create_event, delete_event, get_event, list_events, update_event};
use crate::handlers::{health_check, method_not_allowed, route_not_found};
use crate::state::AppState;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// The five event endpoints, relative to the API base path.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let api = event_routes()
        .method_not_allowed_fallback(method_not_allowed)
        .layer(SetResponseHeaderLayer::if_not_present(
        CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    ));

    let router = Router::new().route("/health", get(health_check));
    // axum refuses to nest at the root, so an empty base path merges instead.
    let router = if config.api_base_path.is_empty() {
        router.merge(api)
    } else {
        router.nest(&config.api_base_path, api)
    };

    router
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(create_security_headers_layer(config.production))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(create_cors_layer(&config.cors_allowed_origins))
}
