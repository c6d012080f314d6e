use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use evently_core::{Event, EventId, EventPatch, NewEvent};
use parking_lot::RwLock;

use super::EventRepository;

/// Process-local store with the same observable behavior as the Postgres adapter.
#[derive(Default)]
pub struct InMemoryEventRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: EventId,
    rows: BTreeMap<EventId, Event>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `updated_at` must move forward even when the clock has not.
fn restamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, sqlx::Error> {
        let now = Utc::now();
        let mut state = self.state.write();
        state.last_id += 1;
        let row = Event {
            id: state.last_id,
            title: event.title,
            description: event.description,
            location: event.location,
            start_date: event.start_date,
            end_date: event.end_date,
            category: event.category,
            max_attendees: event.max_attendees,
            image_url: event.image_url,
            is_active: event.is_active,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Event>, sqlx::Error> {
        let mut rows: Vec<Event> = self.state.read().rows.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, sqlx::Error> {
        Ok(self.state.read().rows.get(&id).cloned())
    }

    async fn update(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, sqlx::Error> {
        let mut state = self.state.write();
        let Some(row) = state.rows.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(row);
        row.updated_at = restamp(row.updated_at, Utc::now());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: EventId) -> Result<bool, sqlx::Error> {
        Ok(self.state.write().rows.remove(&id).is_some())
    }
}
