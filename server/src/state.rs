use std::sync::Arc;

use crate::repository::EventRepository;
use crate::services::EventService;

#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
}

impl AppState {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self {
            events: EventService::new(repo),
        }
    }
}
