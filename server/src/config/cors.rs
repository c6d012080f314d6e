use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// CORS for the browser dashboard. Only the verbs the event API serves are allowed.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS));

    match allowed_origins(origins) {
        Some(list) => layer.allow_origin(list),
        None => layer.allow_origin(AllowOrigin::any()),
    }
}

fn allowed_origins(configured: &[String]) -> Option<AllowOrigin> {
    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!(%origin, "CORS: allowing origin");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(%origin, error = %e, "CORS: ignoring invalid origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS: no valid origins configured, allowing any origin");
        None
    } else {
        tracing::info!(count = origins.len(), "CORS: configured allowed origins");
        Some(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALLOWED_ORIGINS;

    #[test]
    fn default_origins_are_valid() {
        for origin in DEFAULT_ALLOWED_ORIGINS.split(',') {
            assert!(
                origin.trim().parse::<HeaderValue>().is_ok(),
                "default origin '{origin}' should be a valid header value"
            );
        }
    }

    #[test]
    fn invalid_origins_fall_back_to_any() {
        assert!(allowed_origins(&["bad\norigin".to_string()]).is_none());
        assert!(allowed_origins(&[]).is_none());
        assert!(allowed_origins(&["http://localhost:3000".to_string()]).is_some());
    }
}
