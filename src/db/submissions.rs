use uuid::Uuid;

use crate::db::PgStore;
use crate::models::submission::{
    InterestSubmission, InterestSubmissionRequest, SpeakerSubmission, SpeakerSubmissionRequest,
    SponsorSubmission, SponsorSubmissionRequest, TimeSlot,
};

impl PgStore {
    pub async fn insert_speaker_submission(
        &self,
        request: &SpeakerSubmissionRequest,
    ) -> Result<SpeakerSubmission, sqlx::Error> {
        let links = request.social_links.clone().unwrap_or_default();
        sqlx::query_as::<_, SpeakerSubmission>(
            r#"
            INSERT INTO speaker_submissions
                (id, full_name, email, organization, talk_title, talk_type, talk_description,
                 previous_speaking_experience, speaker_bio, linkedin, twitter, github,
                 preferred_time_slot, additional_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(&request.organization)
        .bind(&request.talk_title)
        .bind(request.talk_type)
        .bind(&request.talk_description)
        .bind(request.previous_speaking_experience)
        .bind(&request.speaker_bio)
        .bind(&links.linkedin)
        .bind(&links.twitter)
        .bind(&links.github)
        .bind(request.preferred_time_slot.unwrap_or(TimeSlot::Any))
        .bind(&request.additional_notes)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_speaker_submissions(&self) -> Result<Vec<SpeakerSubmission>, sqlx::Error> {
        sqlx::query_as::<_, SpeakerSubmission>(
            "SELECT * FROM speaker_submissions ORDER BY submitted_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Duplicate emails surface as a unique violation.
    pub async fn insert_sponsor_submission(
        &self,
        request: &SponsorSubmissionRequest,
    ) -> Result<SponsorSubmission, sqlx::Error> {
        sqlx::query_as::<_, SponsorSubmission>(
            r#"
            INSERT INTO sponsor_submissions
                (id, name, email, company, phone, job_title, package, message, additional_options)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.company)
        .bind(&request.phone)
        .bind(&request.job_title)
        .bind(request.package)
        .bind(&request.message)
        .bind(&request.additional_options)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_sponsor_submissions(&self) -> Result<Vec<SponsorSubmission>, sqlx::Error> {
        sqlx::query_as::<_, SponsorSubmission>(
            "SELECT * FROM sponsor_submissions ORDER BY submitted_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Duplicate phones surface as a unique violation; duplicate emails are
    /// handled by the caller's pre-insert lookup.
    pub async fn insert_interest_submission(
        &self,
        request: &InterestSubmissionRequest,
    ) -> Result<InterestSubmission, sqlx::Error> {
        sqlx::query_as::<_, InterestSubmission>(
            r#"
            INSERT INTO interest_submissions (id, name, email, interest, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.email)
        .bind(request.interest)
        .bind(&request.phone)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_interest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<InterestSubmission>, sqlx::Error> {
        sqlx::query_as::<_, InterestSubmission>(
            "SELECT * FROM interest_submissions WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_interest_submissions(&self) -> Result<Vec<InterestSubmission>, sqlx::Error> {
        sqlx::query_as::<_, InterestSubmission>(
            "SELECT * FROM interest_submissions ORDER BY submitted_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }
}
