use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::db;
use crate::handlers::AppJson;
use crate::models::submission::SponsorSubmissionRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, list};

pub async fn submit_sponsor(
    State(state): State<AppState>,
    AppJson(request): AppJson<SponsorSubmissionRequest>,
) -> Result<Response, AppError> {
    if let Err(errors) = request.validate() {
        return Err(AppError::ValidationError(errors.join(", ")));
    }
    let request = request.normalized();
    let submission = match state.store.insert_sponsor_submission(&request).await {
        Ok(submission) => submission,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::Conflict(
                "A sponsorship request with this email has already been submitted".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let notifier = state.notifier.clone();
    let notification = submission.clone();
    tokio::spawn(async move {
        notifier.notify_sponsor_submission(&notification).await;
    });

    Ok(created(submission, "Sponsorship request submitted successfully").into_response())
}

pub async fn list_sponsors(State(state): State<AppState>) -> Result<Response, AppError> {
    let submissions = state.store.list_sponsor_submissions().await?;
    Ok(list(submissions).into_response())
}
