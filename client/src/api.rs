//! Typed wrappers over the REST endpoints.

use evently_core::{CreateEventInput, DeletedEvent, Envelope, Event, EventId, UpdateEventInput};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

const FALLBACK_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone)]
pub struct EventsApi {
    http: Client,
    base_url: String,
}

impl EventsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and unwraps the envelope into `data`.
    async fn execute<T>(&self, request: RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Proxies and the framework itself can answer with a non-JSON error body.
        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(ClientError::Decode(e)),
            Err(_) => {
                debug!(status = status.as_u16(), "Error response without an envelope");
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: FALLBACK_ERROR.to_string(),
                    code: None,
                    details: Vec::new(),
                });
            }
        };
        debug!(status = status.as_u16(), success = envelope.success, "API response");

        if envelope.success {
            return envelope.data.ok_or(ClientError::MissingData);
        }
        Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope.error.unwrap_or_else(|| FALLBACK_ERROR.to_string()),
            code: envelope.code,
            details: envelope.details.unwrap_or_default(),
        })
    }

    /// GET /events
    pub async fn get_all(&self) -> ClientResult<Vec<Event>> {
        self.execute(self.http.get(self.url("/events"))).await
    }

    /// GET /events/:id
    pub async fn get_by_id(&self, id: EventId) -> ClientResult<Event> {
        self.execute(self.http.get(self.url(&format!("/events/{id}"))))
            .await
    }

    /// POST /events
    pub async fn create(&self, input: &CreateEventInput) -> ClientResult<Event> {
        self.execute(self.http.post(self.url("/events")).json(input))
            .await
    }

    /// PUT /events/:id
    pub async fn update(&self, id: EventId, input: &UpdateEventInput) -> ClientResult<Event> {
        self.execute(self.http.put(self.url(&format!("/events/{id}"))).json(input))
            .await
    }

    /// DELETE /events/:id
    pub async fn delete(&self, id: EventId) -> ClientResult<DeletedEvent> {
        self.execute(self.http.delete(self.url(&format!("/events/{id}"))))
            .await
    }
}
