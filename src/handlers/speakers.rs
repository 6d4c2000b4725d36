use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::handlers::AppJson;
use crate::models::submission::SpeakerSubmissionRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, list};

pub async fn submit_speaker(
    State(state): State<AppState>,
    AppJson(request): AppJson<SpeakerSubmissionRequest>,
) -> Result<Response, AppError> {
    if let Err(errors) = request.validate() {
        return Err(AppError::ValidationError(errors.join(", ")));
    }
    let request = request.normalized();
    let submission = state.store.insert_speaker_submission(&request).await?;

    let notifier = state.notifier.clone();
    let notification = submission.clone();
    tokio::spawn(async move {
        notifier.notify_speaker_submission(&notification).await;
    });

    Ok(created(submission, "Speaker application submitted successfully").into_response())
}

pub async fn list_speakers(State(state): State<AppState>) -> Result<Response, AppError> {
    let submissions = state.store.list_speaker_submissions().await?;
    Ok(list(submissions).into_response())
}
