use uuid::Uuid;

use crate::db::PgStore;
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};

impl PgStore {
    pub async fn insert_event(&self, request: &CreateEventRequest) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (id, title, description, detailed_description, date, time, location, available_seats, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.detailed_description)
        .bind(request.date)
        .bind(&request.time)
        .bind(&request.location)
        .bind(request.available_seats)
        .bind(&request.image)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Partial update; absent fields keep their stored value. An empty-string
    /// image clears the column.
    pub async fn update_event(
        &self,
        id: Uuid,
        update: &UpdateEventRequest,
    ) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                detailed_description = COALESCE($4, detailed_description),
                date = COALESCE($5, date),
                time = COALESCE($6, time),
                location = COALESCE($7, location),
                available_seats = COALESCE($8, available_seats),
                image = CASE
                    WHEN $9::text IS NULL THEN image
                    WHEN $9 = '' THEN NULL
                    ELSE $9
                END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.detailed_description)
        .bind(update.date)
        .bind(&update.time)
        .bind(&update.location)
        .bind(update.available_seats)
        .bind(&update.image)
        .fetch_optional(&self.pool)
        .await
    }

    /// Fails with a foreign key violation while registrations still
    /// reference the event.
    pub async fn delete_event(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
