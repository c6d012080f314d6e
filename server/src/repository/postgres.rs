use async_trait::async_trait;
use evently_core::{Event, EventId, EventPatch, NewEvent};
use sqlx::PgPool;

use super::EventRepository;

const COLUMNS: &str = "id, title, description, location, start_date, end_date, category, \
     max_attendees, image_url, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events \
                (title, description, location, start_date, end_date, category, \
                 max_attendees, image_url, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW()) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(&event.category)
            .bind(event.max_attendees)
            .bind(&event.image_url)
            .bind(event.is_active)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_all(&self) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Event>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Non-null columns use `COALESCE`; the nullable ones carry an explicit
    /// "was sent" flag so that `null` can clear them.
    async fn update(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                location = COALESCE($4, location), \
                start_date = COALESCE($5, start_date), \
                end_date = COALESCE($6, end_date), \
                category = COALESCE($7, category), \
                max_attendees = CASE WHEN $8 THEN $9 ELSE max_attendees END, \
                image_url = CASE WHEN $10 THEN $11 ELSE image_url END, \
                is_active = COALESCE($12, is_active), \
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.location)
            .bind(patch.start_date)
            .bind(patch.end_date)
            .bind(patch.category)
            .bind(patch.max_attendees.is_some())
            .bind(patch.max_attendees.flatten())
            .bind(patch.image_url.is_some())
            .bind(patch.image_url.flatten())
            .bind(patch.is_active)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: EventId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
