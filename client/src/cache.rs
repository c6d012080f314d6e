//! Query cache over [`EventsApi`].
//!
//! Reads are served from memory until a mutation through this cache discards
//! the affected entries. Writes made by other clients are not observed until
//! the next invalidation.

use std::collections::HashMap;

use evently_core::{CreateEventInput, DeletedEvent, Event, EventId, UpdateEventInput};
use parking_lot::RwLock;
use tracing::debug;

use crate::api::EventsApi;
use crate::error::ClientResult;

pub struct EventsCache {
    api: EventsApi,
    list: RwLock<Option<Vec<Event>>>,
    entries: RwLock<HashMap<EventId, Event>>,
}

impl EventsCache {
    pub fn new(api: EventsApi) -> Self {
        Self {
            api,
            list: RwLock::new(None),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn api(&self) -> &EventsApi {
        &self.api
    }

    pub async fn events(&self) -> ClientResult<Vec<Event>> {
        let cached = self.list.read().clone();
        if let Some(events) = cached {
            return Ok(events);
        }
        let fresh = self.api.get_all().await?;
        *self.list.write() = Some(fresh.clone());
        Ok(fresh)
    }

    pub async fn event(&self, id: EventId) -> ClientResult<Event> {
        let cached = self.entries.read().get(&id).cloned();
        if let Some(event) = cached {
            return Ok(event);
        }
        let fresh = self.api.get_by_id(id).await?;
        self.entries.write().insert(id, fresh.clone());
        Ok(fresh)
    }

    pub fn cached_events(&self) -> Option<Vec<Event>> {
        self.list.read().clone()
    }

    pub fn cached_event(&self, id: EventId) -> Option<Event> {
        self.entries.read().get(&id).cloned()
    }

    pub async fn create(&self, input: &CreateEventInput) -> ClientResult<Event> {
        let created = self.api.create(input).await?;
        self.invalidate_list();
        Ok(created)
    }

    pub async fn update(&self, id: EventId, input: &UpdateEventInput) -> ClientResult<Event> {
        let updated = self.api.update(id, input).await?;
        self.invalidate_list();
        self.invalidate_event(id);
        Ok(updated)
    }

    pub async fn delete(&self, id: EventId) -> ClientResult<DeletedEvent> {
        let deleted = self.api.delete(id).await?;
        self.invalidate_list();
        self.invalidate_event(id);
        Ok(deleted)
    }

    pub fn invalidate_list(&self) {
        debug!("Invalidating events list");
        *self.list.write() = None;
    }

    pub fn invalidate_event(&self, id: EventId) {
        debug!(id, "Invalidating event");
        self.entries.write().remove(&id);
    }

    /// Drops everything; the next reads go to the server.
    pub fn clear(&self) {
        self.invalidate_list();
        self.entries.write().clear();
    }
}
