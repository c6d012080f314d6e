use std::sync::Arc;

use evently_core::validation::{check_schedule, validate_create, validate_update};
use evently_core::{CreateEventInput, Event, EventId, UpdateEventInput};
use tracing::{debug, info, instrument};

use crate::repository::EventRepository;
use crate::utils::{AppError, AppResult};

pub const EVENT_NOT_FOUND: &str = "Event not found";

fn not_found() -> AppError {
    AppError::NotFound(EVENT_NOT_FOUND.to_string())
}

/// Validation and not-found handling on top of the persistence adapter.
#[derive(Clone)]
pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "events.list", skip(self))]
    pub async fn list(&self) -> AppResult<Vec<Event>> {
        let events = self.repo.list_all().await?;
        debug!(count = events.len(), "Listed events");
        Ok(events)
    }

    #[instrument(name = "events.get", skip(self))]
    pub async fn get(&self, id: EventId) -> AppResult<Event> {
        self.repo.get_by_id(id).await?.ok_or_else(not_found)
    }

    #[instrument(name = "events.create", skip(self, input))]
    pub async fn create(&self, input: CreateEventInput) -> AppResult<Event> {
        let new_event = validate_create(&input)?;
        let created = self.repo.create(new_event).await?;
        info!(id = created.id, title = %created.title, "Event created");
        Ok(created)
    }

    /// When only one end of the schedule is sent, the other comes from the
    /// stored row so that `endDate > startDate` holds after the write.
    #[instrument(name = "events.update", skip(self, input))]
    pub async fn update(&self, id: EventId, input: UpdateEventInput) -> AppResult<Event> {
        let patch = validate_update(&input)?;

        if patch.touches_schedule() {
            let current = self.get(id).await?;
            let start = patch.start_date.unwrap_or(current.start_date);
            let end = patch.end_date.unwrap_or(current.end_date);
            check_schedule(start, end)?;
        }

        let updated = self.repo.update(id, patch).await?.ok_or_else(not_found)?;
        info!(id = updated.id, "Event updated");
        Ok(updated)
    }

    #[instrument(name = "events.delete", skip(self))]
    pub async fn delete(&self, id: EventId) -> AppResult<EventId> {
        if !self.repo.delete(id).await? {
            return Err(not_found());
        }
        info!(id, "Event deleted");
        Ok(id)
    }
}
