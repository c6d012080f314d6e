//! Persistence adapter for the `events` table.
//!
//! Each call is one independent statement; there are no transactions spanning
//! calls and concurrent writers resolve as last-write-wins.

use async_trait::async_trait;
use evently_core::{Event, EventId, EventPatch, NewEvent};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryEventRepository;
pub use postgres::PgEventRepository;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a row, stamping id and both timestamps. Returns the created row.
    async fn create(&self, event: NewEvent) -> Result<Event, sqlx::Error>;

    /// All rows, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Event>, sqlx::Error>;

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, sqlx::Error>;

    /// Apply the present fields and restamp `updated_at`. `None` if no such row.
    async fn update(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, sqlx::Error>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: EventId) -> Result<bool, sqlx::Error>;
}
