use uuid::Uuid;

use crate::db::PgStore;
use crate::ledger::RegistrationStore;
use crate::models::event::Event;
use crate::models::registration::{
    Registration, RegistrationRequest, RegistrationStatus, RegistrationWithEvent,
    RegistrationWithEventRow,
};

impl RegistrationStore for PgStore {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        self.find_event_by_id(event_id).await
    }

    async fn count_active_registrations(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status <> 'cancelled'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_registration_by_event_and_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> Result<Option<Registration>, sqlx::Error> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = $1 AND email = $2",
        )
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    // The unique constraint carries the atomicity; a duplicate insert returns
    // no row instead of an error.
    async fn insert_if_absent(
        &self,
        request: &RegistrationRequest,
    ) -> Result<Option<Registration>, sqlx::Error> {
        sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations
                (id, event_id, name, email, phone, github_url, linkedin_url, portfolio_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (event_id, email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.event_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.github_url)
        .bind(&request.linkedin_url)
        .bind(&request.portfolio_url)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_registration(&self, id: Uuid) -> Result<Option<Registration>, sqlx::Error> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>, sqlx::Error> {
        sqlx::query_as::<_, Registration>(
            "UPDATE registrations SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }
}

impl PgStore {
    pub async fn list_registrations_for_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = $1 ORDER BY registered_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    // The FK is RESTRICT, so the inner join never drops a row.
    pub async fn list_registrations_for_email(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationWithEvent>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RegistrationWithEventRow>(
            r#"
            SELECT r.*,
                   e.title AS event_title,
                   e.date AS event_date,
                   e.time AS event_time,
                   e.location AS event_location
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            WHERE r.email = $1
            ORDER BY r.registered_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(RegistrationWithEvent::from).collect())
    }

    pub async fn delete_registration(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
